//! sRGB transfer function lookup.

use std::sync::OnceLock;

static SRGB_TO_LINEAR: OnceLock<[f32; 256]> = OnceLock::new();

#[inline]
fn decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// 256-entry table mapping a gamma-encoded byte to linear intensity.
pub fn srgb_to_linear_table() -> &'static [f32; 256] {
    SRGB_TO_LINEAR.get_or_init(|| {
        let mut table = [0.0f32; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = decode(i as f64 / 255.0) as f32;
        }
        table
    })
}

/// Decode one gamma-encoded byte.
#[inline]
pub fn srgb_to_linear(encoded: u8) -> f32 {
    srgb_to_linear_table()[encoded as usize]
}
