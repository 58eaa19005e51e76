//! Conversion kernels.
//!
//! Every kernel walks the source element by element and writes into a
//! destination already sized by the caller. Source scalars are read with
//! unaligned loads, so the caller's buffer needs no particular alignment.

use super::rule::{ConversionRule, ScalarRule};
use super::srgb::srgb_to_linear_table;
use crate::core::{with_elements, ElementBuffer, ElementSliceMut, TypedArrayView};
use crate::util::{AttributeType, Error, Result, Scalar, ScalarKind};
use half::f16;

/// Bind `$T` to the Rust type of a source scalar kind.
macro_rules! with_source_scalar {
    ($kind:expr, $T:ident => $body:expr, else $fallback:expr) => {
        match $kind {
            ScalarKind::Uint8 => {
                type $T = u8;
                $body
            }
            ScalarKind::Int8 => {
                type $T = i8;
                $body
            }
            ScalarKind::Uint16 => {
                type $T = u16;
                $body
            }
            ScalarKind::Int16 => {
                type $T = i16;
                $body
            }
            ScalarKind::Uint32 => {
                type $T = u32;
                $body
            }
            ScalarKind::Int32 => {
                type $T = i32;
                $body
            }
            ScalarKind::Uint64 => {
                type $T = u64;
                $body
            }
            ScalarKind::Int64 => {
                type $T = i64;
                $body
            }
            ScalarKind::Float16 => {
                type $T = f16;
                $body
            }
            ScalarKind::Float32 => {
                type $T = f32;
                $body
            }
            ScalarKind::Float64 => {
                type $T = f64;
                $body
            }
            ScalarKind::Unknown => $fallback,
        }
    };
}

/// Convert `source` into `dest` (storage of type `dest_type`) using `rule`.
///
/// `dest` must hold exactly `rule.destination_scalars(source.len(), dest_type)`
/// scalars of `dest_type`'s kind. A rule that does not apply to the pair is
/// reported as [`Error::TypeMismatch`].
pub fn convert(
    source: &TypedArrayView<'_>,
    dest_type: AttributeType,
    dest: &mut ElementSliceMut<'_>,
    rule: ConversionRule,
) -> Result<()> {
    let tag = source.tag();
    if !rule.applies_to(tag, dest_type) || dest.scalar_kind() != dest_type.scalar_kind() {
        return Err(Error::mismatch(tag, dest_type));
    }
    let expected = rule.destination_scalars(source.len(), dest_type);
    if dest.num_scalars() != expected {
        return Err(Error::SizeInvariant {
            expected,
            actual: dest.num_scalars(),
        });
    }

    let comps = tag.num_components();
    match rule {
        ConversionRule::DirectCopy | ConversionRule::Flatten { scalar: ScalarRule::Copy, .. } => {
            with_elements!(ElementSliceMut, dest, d => copy_bytes(source, &mut **d));
        }
        ConversionRule::NumericConvert | ConversionRule::Flatten { scalar: ScalarRule::Convert, .. } => {
            with_source_scalar!(tag.scalar_kind(), S => {
                with_elements!(ElementSliceMut, dest, d => convert_scalars::<S, _>(source, &mut **d))
            }, else return Err(Error::mismatch(tag, dest_type)));
        }
        ConversionRule::ExpandScalarToVector3 => {
            with_source_scalar!(tag.scalar_kind(), S => {
                with_elements!(ElementSliceMut, dest, d => expand_to_vec3::<S, _>(source, &mut **d))
            }, else return Err(Error::mismatch(tag, dest_type)));
        }
        ConversionRule::ExpandToColorWithAlphaDefault => {
            with_source_scalar!(tag.scalar_kind(), S => {
                with_elements!(ElementSliceMut, dest, d => expand_to_color::<S, _>(source, comps, 1.0, &mut **d))
            }, else return Err(Error::mismatch(tag, dest_type)));
        }
        ConversionRule::ExpandToColorNormalized => {
            with_source_scalar!(tag.scalar_kind(), S => {
                // f64 keeps 32-bit maxima exact enough that max/max == 1.0.
                let factor = 1.0 / <S as Scalar>::MAX_F64;
                with_elements!(ElementSliceMut, dest, d => expand_to_color::<S, _>(source, comps, factor, &mut **d))
            }, else return Err(Error::mismatch(tag, dest_type)));
        }
        ConversionRule::ExpandSrgbToColor => {
            with_elements!(ElementSliceMut, dest, d => expand_srgb_to_color(source.bytes(), comps, &mut **d));
        }
        ConversionRule::ConvertToQuaternion => {
            with_source_scalar!(tag.scalar_kind(), S => {
                with_elements!(ElementSliceMut, dest, d => to_quaternion::<S, _>(source, &mut **d))
            }, else return Err(Error::mismatch(tag, dest_type)));
        }
    }
    Ok(())
}

/// Convert into a freshly allocated buffer.
pub fn convert_to_buffer(source: &TypedArrayView<'_>, dest_type: AttributeType, rule: ConversionRule) -> Result<ElementBuffer> {
    let mut buf = ElementBuffer::zeroed(dest_type, rule.destination_len(source.len()))
        .ok_or_else(|| Error::mismatch(source.tag(), dest_type))?;
    convert(source, dest_type, &mut buf.as_slice_mut(), rule)?;
    Ok(buf)
}

// === Kernels ===

fn copy_bytes<D: Scalar>(source: &TypedArrayView<'_>, dst: &mut [D]) {
    bytemuck::cast_slice_mut::<D, u8>(dst).copy_from_slice(source.bytes());
}

fn convert_scalars<S: Scalar, D: Scalar>(source: &TypedArrayView<'_>, dst: &mut [D]) {
    for (d, s) in dst.iter_mut().zip(source.scalars::<S>()) {
        *d = s.cast();
    }
}

fn expand_to_vec3<S: Scalar, D: Scalar>(source: &TypedArrayView<'_>, dst: &mut [D]) {
    for (out, s) in dst.chunks_exact_mut(3).zip(source.scalars::<S>()) {
        out.fill(s.cast());
    }
}

/// RGBA from the first 1..4 channels. Present channels are multiplied by
/// `scale`, missing G/B become 0 and a missing alpha becomes 1.
fn expand_to_color<S: Scalar, D: Scalar>(source: &TypedArrayView<'_>, comps: usize, scale: f64, dst: &mut [D]) {
    let channel = |s: S| -> D {
        if scale == 1.0 {
            s.cast()
        } else {
            D::from_f64(s.to_f64() * scale)
        }
    };
    let defaults = [D::from_f64(0.0), D::from_f64(0.0), D::from_f64(0.0), D::from_f64(1.0)];
    let mut scalars = source.scalars::<S>();
    for out in dst.chunks_exact_mut(4) {
        out.copy_from_slice(&defaults);
        for (o, s) in out.iter_mut().zip(scalars.by_ref().take(comps)) {
            *o = channel(s);
        }
    }
}

fn expand_srgb_to_color<D: Scalar>(bytes: &[u8], comps: usize, dst: &mut [D]) {
    let lut = srgb_to_linear_table();
    let linear = |b: u8| D::from_f64(lut[b as usize] as f64);
    let alpha = |b: u8| D::from_f64(b as f64 / 255.0);
    let zero = D::from_f64(0.0);
    let one = D::from_f64(1.0);
    for (out, px) in dst.chunks_exact_mut(4).zip(bytes.chunks_exact(comps)) {
        let rgba = match *px {
            [r] => [linear(r), zero, zero, one],
            [r, a] => [linear(r), zero, zero, alpha(a)],
            [r, g, b] => [linear(r), linear(g), linear(b), one],
            [r, g, b, a] => [linear(r), linear(g), linear(b), alpha(a)],
            _ => [zero, zero, zero, one],
        };
        out.copy_from_slice(&rgba);
    }
}

fn to_quaternion<S: Scalar, D: Scalar>(source: &TypedArrayView<'_>, dst: &mut [D]) {
    let mut scalars = source.scalars::<S>();
    for out in dst.chunks_exact_mut(4) {
        let mut ijkw = [S::default(); 4];
        for v in ijkw.iter_mut() {
            if let Some(s) = scalars.next() {
                *v = s;
            }
        }
        out[0] = ijkw[3].cast();
        out[1] = ijkw[0].cast();
        out[2] = ijkw[1].cast();
        out[3] = ijkw[2].cast();
    }
}
