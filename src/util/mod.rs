//! Utility types shared by every layer.
//!
//! This module contains fundamental types used throughout the library:
//! - [`ScalarKind`] / [`Scalar`] - Scalar storage atoms
//! - [`ElementTypeTag`] / [`AttributeType`] - Source and destination type registry
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam
//! - [`init_tracing`] - Subscriber setup

mod scalar;
mod element_type;
mod error;
mod math;
mod logging;

pub use scalar::*;
pub use element_type::*;
pub use error::*;
pub use math::*;
pub use logging::{env_filter, init_tracing, LOG_ENV};
