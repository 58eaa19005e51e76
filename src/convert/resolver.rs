//! Destination type and conversion rule resolution.

use super::rule::{ConversionRule, ScalarRule};
use crate::util::{AttributeType, ElementTypeTag, Error, Result, ScalarKind};

/// Pick the storage type for an attribute created from `tag`.
///
/// Narrow integers widen to the next native width and multi-component
/// integer sources other than `int` flatten into a scalar array. Returns
/// [`AttributeType::Unsupported`] when no representation exists.
pub fn resolve_destination_type(tag: ElementTypeTag) -> AttributeType {
    use AttributeType as A;
    use ElementTypeTag as T;
    match tag {
        T::Uchar | T::Uchar2 | T::Uchar3 | T::Uchar4 => A::Uchar,
        T::Char | T::Char2 | T::Char3 | T::Char4 => A::Uchar,
        T::UcharSrgbR | T::UcharSrgbRa | T::UcharSrgbRgb | T::UcharSrgbRgba => A::Uchar,
        T::Ufixed8 | T::Ufixed8x2 | T::Ufixed8x3 | T::Ufixed8x4 => A::Uchar,

        T::Ushort | T::Ushort2 | T::Ushort3 | T::Ushort4 => A::Uint,
        T::Ufixed16 | T::Ufixed16x2 | T::Ufixed16x3 | T::Ufixed16x4 => A::Uint,
        T::Short | T::Short2 | T::Short3 | T::Short4 => A::Int,

        T::Uint | T::Uint2 | T::Uint3 | T::Uint4 => A::Uint,
        T::Ufixed32 | T::Ufixed32x2 | T::Ufixed32x3 | T::Ufixed32x4 => A::Uint,
        T::Int => A::Int,
        T::Int2 => A::Int2,
        T::Int3 => A::Int3,
        T::Int4 => A::Int4,

        T::Long | T::Long2 | T::Long3 | T::Long4 => A::Int64,
        T::Ulong | T::Ulong2 | T::Ulong3 | T::Ulong4 => A::Uint64,

        T::Half => A::Half,
        T::Half2 => A::Half2,
        T::Half3 => A::Half3,
        T::Half4 => A::Half4,
        T::Float => A::Float,
        T::Float2 => A::Float2,
        T::Float3 => A::Float3,
        T::Float4 => A::Float4,
        T::Double => A::Double,
        T::Double2 => A::Double2,
        T::Double3 => A::Double3,
        T::Double4 => A::Double4,

        T::Undefined => A::Unsupported,
    }
}

#[inline]
fn scalar_rule(source: ScalarKind, dest: ScalarKind) -> ScalarRule {
    if source.storage_compatible(dest) {
        ScalarRule::Copy
    } else {
        ScalarRule::Convert
    }
}

/// Pick the rule for writing `source` data into a `dest` attribute.
///
/// The first matching case wins:
/// 1. quaternion targets take 4-component float sources, reordered
/// 2. `float4` targets are colors: sRGB decode, unsigned integer
///    normalization or float expansion; signed and 64-bit integers mismatch
/// 3. 3-component targets take 1-component float sources, replicated
/// 4. equal component counts copy or convert
/// 5. scalar targets flatten multi-component sources
pub fn resolve_rule(source: ElementTypeTag, dest: AttributeType) -> Result<ConversionRule> {
    if !source.is_defined() || !dest.is_supported() {
        return Err(Error::mismatch(source, dest));
    }
    let (src_kind, src_comps) = (source.scalar_kind(), source.num_components());
    let (dst_kind, dst_comps) = (dest.scalar_kind(), dest.num_components());

    if dest.is_quaternion() {
        return if src_comps == 4 && src_kind.is_float() {
            Ok(ConversionRule::ConvertToQuaternion)
        } else {
            Err(Error::mismatch(source, dest))
        };
    }

    if dest == AttributeType::Float4 {
        if source.is_srgb() {
            return Ok(ConversionRule::ExpandSrgbToColor);
        }
        let unsigned_int = matches!(src_kind, ScalarKind::Uint8 | ScalarKind::Uint16 | ScalarKind::Uint32);
        if unsigned_int || source.is_normalized() {
            return Ok(ConversionRule::ExpandToColorNormalized);
        }
        if !src_kind.is_float() {
            return Err(Error::mismatch(source, dest));
        }
        if src_comps < 4 {
            return Ok(ConversionRule::ExpandToColorWithAlphaDefault);
        }
    }

    if dst_comps == 3 && src_comps == 1 && src_kind.is_float() {
        return Ok(ConversionRule::ExpandScalarToVector3);
    }

    if src_comps == dst_comps {
        return Ok(match scalar_rule(src_kind, dst_kind) {
            ScalarRule::Copy => ConversionRule::DirectCopy,
            ScalarRule::Convert => ConversionRule::NumericConvert,
        });
    }

    if dst_comps == 1 {
        return Ok(ConversionRule::Flatten {
            multiplier: src_comps,
            scalar: scalar_rule(src_kind, dst_kind),
        });
    }

    Err(Error::mismatch(source, dest))
}

/// Resolve the destination type for `tag` and the rule that fills it.
pub fn resolve(tag: ElementTypeTag) -> Result<(AttributeType, ConversionRule)> {
    let dest = resolve_destination_type(tag);
    if !dest.is_supported() {
        return Err(Error::UnsupportedSourceType(tag));
    }
    Ok((dest, resolve_rule(tag, dest)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_table() {
        use AttributeType as A;
        use ElementTypeTag as T;
        assert_eq!(resolve_destination_type(T::Float3), A::Float3);
        assert_eq!(resolve_destination_type(T::Half2), A::Half2);
        assert_eq!(resolve_destination_type(T::Double4), A::Double4);
        assert_eq!(resolve_destination_type(T::Uchar3), A::Uchar);
        assert_eq!(resolve_destination_type(T::Char), A::Uchar);
        assert_eq!(resolve_destination_type(T::Ushort2), A::Uint);
        assert_eq!(resolve_destination_type(T::Short4), A::Int);
        assert_eq!(resolve_destination_type(T::Int3), A::Int3);
        assert_eq!(resolve_destination_type(T::Long2), A::Int64);
        assert_eq!(resolve_destination_type(T::Ulong), A::Uint64);
        assert_eq!(resolve_destination_type(T::UcharSrgbRgba), A::Uchar);
        assert_eq!(resolve_destination_type(T::Ufixed16x3), A::Uint);
        assert_eq!(resolve_destination_type(T::Undefined), A::Unsupported);
    }

    #[test]
    fn test_color_rules() {
        use AttributeType as A;
        use ElementTypeTag as T;
        assert_eq!(resolve_rule(T::UcharSrgbRgb, A::Float4).unwrap(), ConversionRule::ExpandSrgbToColor);
        assert_eq!(resolve_rule(T::Uchar4, A::Float4).unwrap(), ConversionRule::ExpandToColorNormalized);
        assert_eq!(resolve_rule(T::Ushort, A::Float4).unwrap(), ConversionRule::ExpandToColorNormalized);
        assert_eq!(resolve_rule(T::Uint3, A::Float4).unwrap(), ConversionRule::ExpandToColorNormalized);
        assert_eq!(resolve_rule(T::Float3, A::Float4).unwrap(), ConversionRule::ExpandToColorWithAlphaDefault);
        assert_eq!(resolve_rule(T::Double, A::Float4).unwrap(), ConversionRule::ExpandToColorWithAlphaDefault);
        assert_eq!(resolve_rule(T::Float4, A::Float4).unwrap(), ConversionRule::DirectCopy);
        assert_eq!(resolve_rule(T::Double4, A::Float4).unwrap(), ConversionRule::NumericConvert);
        assert!(resolve_rule(T::Short3, A::Float4).is_err());
    }

    #[test]
    fn test_color_rejects_signed_and_wide_integers() {
        use AttributeType as A;
        use ElementTypeTag as T;
        for tag in [T::Char4, T::Short4, T::Int4, T::Long4, T::Ulong4, T::Int, T::Long2, T::Ulong3] {
            assert!(
                matches!(resolve_rule(tag, A::Float4), Err(Error::TypeMismatch { .. })),
                "{} -> float4[] must mismatch",
                tag
            );
        }
        assert_eq!(resolve_rule(T::Half4, A::Float4).unwrap(), ConversionRule::NumericConvert);
    }

    #[test]
    fn test_structural_rules() {
        use AttributeType as A;
        use ElementTypeTag as T;
        assert_eq!(resolve_rule(T::Float4, A::Quath).unwrap(), ConversionRule::ConvertToQuaternion);
        assert!(resolve_rule(T::Int4, A::Quatf).is_err());
        assert_eq!(resolve_rule(T::Float, A::Float3).unwrap(), ConversionRule::ExpandScalarToVector3);
        assert_eq!(resolve_rule(T::Double3, A::Float3).unwrap(), ConversionRule::NumericConvert);
        assert_eq!(
            resolve_rule(T::Uchar3, A::Uchar).unwrap(),
            ConversionRule::Flatten { multiplier: 3, scalar: ScalarRule::Copy }
        );
        assert_eq!(
            resolve_rule(T::Short2, A::Int).unwrap(),
            ConversionRule::Flatten { multiplier: 2, scalar: ScalarRule::Convert }
        );
        assert!(resolve_rule(T::Float3, A::Float2).is_err());
    }

    #[test]
    fn test_unsupported_source() {
        let tag = ElementTypeTag::from_raw(0x7777);
        assert!(matches!(resolve(tag), Err(Error::UnsupportedSourceType(ElementTypeTag::Undefined))));
        assert!(matches!(
            resolve_rule(tag, AttributeType::Float),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_every_pair_has_an_outcome() {
        for &tag in ElementTypeTag::ALL {
            for &dest in AttributeType::ALL {
                // Any resolved rule must be one the kernel accepts.
                if let Ok(rule) = resolve_rule(tag, dest) {
                    assert!(rule.applies_to(tag, dest), "{} -> {} via {}", tag, dest, rule);
                }
            }
            let (dest, rule) = resolve(tag).unwrap();
            assert!(rule.applies_to(tag, dest), "{} -> {} via {}", tag, dest, rule);
        }
    }
}
