//! Math type re-exports used by typed read-back helpers.

pub use glam::{DQuat, DVec2, DVec3, DVec4, IVec2, IVec3, IVec4, Quat, Vec2, Vec3, Vec4};

/// Time coordinate type (seconds or frames, caller defined).
pub type Chrono = f64;
