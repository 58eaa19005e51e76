//! # primvar-bridge
//!
//! Typed-array conversion and time-varying attribute synchronization for
//! attribute-oriented scene-graph stores.
//!
//! A rendering API hands over numeric arrays tagged with an element type
//! (scalar kind plus 1..4 components, optionally gamma-encoded or
//! normalized). This crate picks the storage type of the matching scene
//! attribute, converts the array into it, and routes the result to either
//! the attribute's constant value or its time samples, clearing whichever
//! representation went stale.
//!
//! ## Modules
//!
//! - [`util`] - Scalar kinds, element type registry, errors
//! - [`core`] - Source views, destination buffers, store capability, spans
//! - [`convert`] - Conversion rules, resolver and kernels
//! - [`sync`] - Slots, commit batches and the synchronizer
//!
//! ## Example
//!
//! ```
//! use primvar_bridge::prelude::*;
//!
//! let sync = Synchronizer::new(MemoryStore::new());
//! let mut points = DestinationSlot::for_role("/mesh/points", SlotRole::Points);
//! let data = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//!
//! let mut batch = CommitBatch::new(24.0);
//! batch.add_entry(
//!     &mut points,
//!     Some(TypedArrayView::from_slice(&data, ElementTypeTag::Float3)?),
//!     true,
//!     true,
//! );
//! let reports = sync.synchronize(batch);
//! assert!(SyncSummary::from_reports(&reports).is_clean());
//! # Ok::<(), primvar_bridge::Error>(())
//! ```

pub mod util;
pub mod core;
pub mod convert;
pub mod sync;

// Re-export commonly used types
pub use util::{AttributeType, ElementTypeTag, Error, Result, ScalarKind};
pub use core::{MemoryStore, SceneStore, TimeCode, TypedArrayView};
pub use sync::{CommitBatch, DestinationSlot, Synchronizer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{AttributeType, ElementTypeTag, Error, Result, ScalarKind};
    pub use crate::core::{
        AttributeHandle, ElementBuffer, ElementSlice, MemoryStore, SampleValue, SceneStore, TargetMode, TimeCode,
        TypedArrayView,
    };
    pub use crate::convert::{resolve, resolve_destination_type, resolve_rule, ConversionRule};
    pub use crate::sync::{
        CommitBatch, DestinationSlot, FieldMask, SlotOutcome, SlotReport, SlotRole, SyncSettings, SyncSummary,
        Synchronizer,
    };
}
