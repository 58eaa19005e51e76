//! Synchronization layer - routing commit batches into the store.
//!
//! This module provides:
//! - [`DestinationSlot`] - Logical attribute with constant and time-sampled targets
//! - [`CommitBatch`] / [`FieldMask`] - The unit of work of one pass
//! - [`Synchronizer`] - Writes each entry to the selected target and clears the other
//! - [`SyncSettings`] - Serializable tuning knobs

mod slot;
mod batch;
mod settings;
mod synchronizer;

pub use slot::{DestinationSlot, SlotRole, SlotType};
pub use batch::{CommitBatch, CommitEntry, FieldMask};
pub use settings::SyncSettings;
pub use synchronizer::{SlotOutcome, SlotReport, SyncSummary, Synchronizer};
