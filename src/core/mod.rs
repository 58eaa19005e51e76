//! Core layer - store capability and fundamental data types.
//!
//! This module provides:
//! - [`TypedArrayView`] - Borrowed, typed source arrays
//! - [`ElementBuffer`] / [`ElementSlice`] / [`ElementSliceMut`] - Destination scalars
//! - [`TimeCode`] - Default vs sampled coordinates
//! - [`SceneStore`] - Capability interface of the scene-graph store
//! - [`MemoryStore`] - In-memory store implementation
//! - [`Span`] / [`ScratchBuffers`] - Scoped writable views

mod array;
mod element;
mod time_code;
mod store;
mod memory;
mod span;

pub(crate) use element::with_elements;

pub use array::TypedArrayView;
pub use element::{ElementBuffer, ElementSlice, ElementSliceMut};
pub use time_code::TimeCode;
pub use store::{AttributeHandle, SceneStore, TargetMode};
pub use memory::{MemoryStore, SampleValue};
pub use span::{ScratchBuffers, Span};
