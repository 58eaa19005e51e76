//! Conversion layer - rule resolution and typed copy kernels.
//!
//! This module provides:
//! - [`ConversionRule`] - How a source array maps into a destination type
//! - [`resolve_destination_type`] / [`resolve_rule`] - Type and rule lookup
//! - [`convert`] - Kernels filling a destination from a source view
//! - [`srgb_to_linear`] - sRGB decode table

mod rule;
mod srgb;
mod kernel;
mod resolver;

pub use rule::{ConversionRule, ScalarRule};
pub use srgb::{srgb_to_linear, srgb_to_linear_table};
pub use kernel::{convert, convert_to_buffer};
pub use resolver::{resolve, resolve_destination_type, resolve_rule};
