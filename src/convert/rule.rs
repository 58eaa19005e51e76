//! Conversion rules between a source tag and a destination attribute type.

use crate::util::{AttributeType, ElementTypeTag};
use std::fmt;

/// How individual scalars move once elements are lined up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarRule {
    /// Bytewise copy, storage representations match.
    Copy,
    /// Per-scalar value cast.
    Convert,
}

/// Behavior applied when writing a source array into a destination attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionRule {
    /// Identical storage representation, bytes copied as-is.
    DirectCopy,
    /// Same component count, each scalar cast to the destination kind.
    NumericConvert,
    /// Each source element spreads across `multiplier` destination elements.
    Flatten { multiplier: usize, scalar: ScalarRule },
    /// One scalar replicated into all three lanes.
    ExpandScalarToVector3,
    /// 1..4 channels into RGBA, missing G/B are 0 and missing A is 1.
    ExpandToColorWithAlphaDefault,
    /// As above, every present channel divided by the source scalar maximum.
    ExpandToColorNormalized,
    /// Gamma-encoded 8-bit channels decoded to linear RGBA; alpha stays linear.
    ExpandSrgbToColor,
    /// (i, j, k, real) source reordered into (real, i, j, k).
    ConvertToQuaternion,
}

impl ConversionRule {
    /// Destination element count for `source_len` source elements.
    #[inline]
    pub const fn destination_len(self, source_len: usize) -> usize {
        match self {
            Self::Flatten { multiplier, .. } => source_len * multiplier,
            _ => source_len,
        }
    }

    /// Destination scalar count for `source_len` elements into `dest`.
    #[inline]
    pub const fn destination_scalars(self, source_len: usize, dest: AttributeType) -> usize {
        self.destination_len(source_len) * dest.num_components()
    }

    /// Check whether the rule is structurally applicable to the pair.
    ///
    /// This is what the kernel enforces before touching any data; the
    /// resolver only ever produces rules for which it holds.
    pub fn applies_to(self, source: ElementTypeTag, dest: AttributeType) -> bool {
        if !source.is_defined() || !dest.is_supported() {
            return false;
        }
        let (src_kind, src_comps) = (source.scalar_kind(), source.num_components());
        let (dst_kind, dst_comps) = (dest.scalar_kind(), dest.num_components());
        match self {
            Self::DirectCopy => src_comps == dst_comps && src_kind.storage_compatible(dst_kind),
            Self::NumericConvert => src_comps == dst_comps,
            Self::Flatten { multiplier, scalar } => {
                multiplier > 0
                    && src_comps == multiplier * dst_comps
                    && (scalar == ScalarRule::Convert || src_kind.storage_compatible(dst_kind))
            }
            Self::ExpandScalarToVector3 => src_comps == 1 && dst_comps == 3,
            Self::ExpandToColorWithAlphaDefault => dst_comps == 4,
            Self::ExpandToColorNormalized => dst_comps == 4 && src_kind.is_integer(),
            Self::ExpandSrgbToColor => dst_comps == 4 && source.is_srgb(),
            Self::ConvertToQuaternion => src_comps == 4 && dst_comps == 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::DirectCopy => "direct-copy",
            Self::NumericConvert => "numeric-convert",
            Self::Flatten { scalar: ScalarRule::Copy, .. } => "flatten-copy",
            Self::Flatten { scalar: ScalarRule::Convert, .. } => "flatten-convert",
            Self::ExpandScalarToVector3 => "expand-scalar-to-vec3",
            Self::ExpandToColorWithAlphaDefault => "expand-to-color",
            Self::ExpandToColorNormalized => "expand-to-color-normalized",
            Self::ExpandSrgbToColor => "expand-srgb-to-color",
            Self::ConvertToQuaternion => "convert-to-quaternion",
        }
    }
}

impl fmt::Display for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flatten { multiplier, .. } => write!(f, "{}({})", self.name(), multiplier),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_len() {
        let flatten = ConversionRule::Flatten { multiplier: 3, scalar: ScalarRule::Copy };
        assert_eq!(flatten.destination_len(10), 30);
        assert_eq!(flatten.destination_scalars(10, AttributeType::Uchar), 30);
        assert_eq!(ConversionRule::ConvertToQuaternion.destination_scalars(2, AttributeType::Quath), 8);
        assert_eq!(ConversionRule::ExpandScalarToVector3.destination_scalars(5, AttributeType::Float3), 15);
    }

    #[test]
    fn test_applies_to() {
        use AttributeType as A;
        use ElementTypeTag as T;
        assert!(!ConversionRule::DirectCopy.applies_to(T::Char3, A::Int3));
        assert!(ConversionRule::DirectCopy.applies_to(T::Uint3, A::Int3));
        assert!(ConversionRule::DirectCopy.applies_to(T::Float3, A::Float3));
        assert!(!ConversionRule::DirectCopy.applies_to(T::Float3, A::Double3));
        assert!(ConversionRule::NumericConvert.applies_to(T::Float3, A::Double3));
        assert!(ConversionRule::ExpandSrgbToColor.applies_to(T::UcharSrgbRa, A::Float4));
        assert!(!ConversionRule::ExpandSrgbToColor.applies_to(T::Uchar2, A::Float4));
        assert!(!ConversionRule::ExpandToColorNormalized.applies_to(T::Float3, A::Float4));
        assert!(!ConversionRule::ConvertToQuaternion.applies_to(T::Undefined, A::Quatf));
    }

    #[test]
    fn test_display() {
        let flatten = ConversionRule::Flatten { multiplier: 2, scalar: ScalarRule::Convert };
        assert_eq!(flatten.to_string(), "flatten-convert(2)");
        assert_eq!(ConversionRule::DirectCopy.to_string(), "direct-copy");
    }
}
