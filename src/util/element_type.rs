//! Element type registry - source tags and destination attribute types.
//!
//! Both enumerations are closed. Every value maps to exactly one
//! `(ScalarKind, component count)` pair with a component count in `1..=4`.

use super::ScalarKind;
use std::fmt;

macro_rules! element_type_tags {
    ($($(#[$doc:meta])* $variant:ident = $raw:literal, $name:literal, $kind:ident, $comps:literal;)*) => {
        /// Element type tag of a source array, as produced by the rendering API.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum ElementTypeTag {
            $($(#[$doc])* $variant = $raw,)*
            /// Unknown/invalid source type
            #[default]
            Undefined = 0xFFFF,
        }

        impl ElementTypeTag {
            /// Every defined tag (excluding `Undefined`).
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Scalar kind and component count of one element.
            #[inline]
            pub const fn describe(self) -> (ScalarKind, u8) {
                match self {
                    $(Self::$variant => (ScalarKind::$kind, $comps),)*
                    Self::Undefined => (ScalarKind::Unknown, 1),
                }
            }

            /// Returns the name of this tag as a string.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                    Self::Undefined => "UNDEFINED",
                }
            }

            /// Parse a tag from its name string.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)*
                    _ => Self::Undefined,
                }
            }

            /// Convert from the raw wire code. Unknown codes map to `Undefined`.
            pub const fn from_raw(raw: u16) -> Self {
                match raw {
                    $($raw => Self::$variant,)*
                    _ => Self::Undefined,
                }
            }
        }
    };
}

element_type_tags! {
    /// Unsigned 8-bit integer
    Uchar = 0, "UCHAR", Uint8, 1;
    Uchar2 = 1, "UCHAR2", Uint8, 2;
    Uchar3 = 2, "UCHAR3", Uint8, 3;
    Uchar4 = 3, "UCHAR4", Uint8, 4;
    /// Signed 8-bit integer
    Char = 4, "CHAR", Int8, 1;
    Char2 = 5, "CHAR2", Int8, 2;
    Char3 = 6, "CHAR3", Int8, 3;
    Char4 = 7, "CHAR4", Int8, 4;
    /// Unsigned 16-bit integer
    Ushort = 8, "USHORT", Uint16, 1;
    Ushort2 = 9, "USHORT2", Uint16, 2;
    Ushort3 = 10, "USHORT3", Uint16, 3;
    Ushort4 = 11, "USHORT4", Uint16, 4;
    /// Signed 16-bit integer
    Short = 12, "SHORT", Int16, 1;
    Short2 = 13, "SHORT2", Int16, 2;
    Short3 = 14, "SHORT3", Int16, 3;
    Short4 = 15, "SHORT4", Int16, 4;
    /// Unsigned 32-bit integer
    Uint = 16, "UINT", Uint32, 1;
    Uint2 = 17, "UINT2", Uint32, 2;
    Uint3 = 18, "UINT3", Uint32, 3;
    Uint4 = 19, "UINT4", Uint32, 4;
    /// Signed 32-bit integer
    Int = 20, "INT", Int32, 1;
    Int2 = 21, "INT2", Int32, 2;
    Int3 = 22, "INT3", Int32, 3;
    Int4 = 23, "INT4", Int32, 4;
    /// Unsigned 64-bit integer
    Ulong = 24, "ULONG", Uint64, 1;
    Ulong2 = 25, "ULONG2", Uint64, 2;
    Ulong3 = 26, "ULONG3", Uint64, 3;
    Ulong4 = 27, "ULONG4", Uint64, 4;
    /// Signed 64-bit integer
    Long = 28, "LONG", Int64, 1;
    Long2 = 29, "LONG2", Int64, 2;
    Long3 = 30, "LONG3", Int64, 3;
    Long4 = 31, "LONG4", Int64, 4;
    /// Half precision float
    Half = 32, "HALF", Float16, 1;
    Half2 = 33, "HALF2", Float16, 2;
    Half3 = 34, "HALF3", Float16, 3;
    Half4 = 35, "HALF4", Float16, 4;
    /// Single precision float
    Float = 36, "FLOAT", Float32, 1;
    Float2 = 37, "FLOAT2", Float32, 2;
    Float3 = 38, "FLOAT3", Float32, 3;
    Float4 = 39, "FLOAT4", Float32, 4;
    /// Double precision float
    Double = 40, "DOUBLE", Float64, 1;
    Double2 = 41, "DOUBLE2", Float64, 2;
    Double3 = 42, "DOUBLE3", Float64, 3;
    Double4 = 43, "DOUBLE4", Float64, 4;
    /// Gamma-encoded 8-bit channels; a trailing alpha channel stays linear
    UcharSrgbR = 48, "UCHAR_SRGB_R", Uint8, 1;
    UcharSrgbRa = 49, "UCHAR_SRGB_RA", Uint8, 2;
    UcharSrgbRgb = 50, "UCHAR_SRGB_RGB", Uint8, 3;
    UcharSrgbRgba = 51, "UCHAR_SRGB_RGBA", Uint8, 4;
    /// Normalized unsigned fixed-point channels
    Ufixed8 = 64, "UFIXED8", Uint8, 1;
    Ufixed8x2 = 65, "UFIXED8_VEC2", Uint8, 2;
    Ufixed8x3 = 66, "UFIXED8_VEC3", Uint8, 3;
    Ufixed8x4 = 67, "UFIXED8_VEC4", Uint8, 4;
    Ufixed16 = 68, "UFIXED16", Uint16, 1;
    Ufixed16x2 = 69, "UFIXED16_VEC2", Uint16, 2;
    Ufixed16x3 = 70, "UFIXED16_VEC3", Uint16, 3;
    Ufixed16x4 = 71, "UFIXED16_VEC4", Uint16, 4;
    Ufixed32 = 72, "UFIXED32", Uint32, 1;
    Ufixed32x2 = 73, "UFIXED32_VEC2", Uint32, 2;
    Ufixed32x3 = 74, "UFIXED32_VEC3", Uint32, 3;
    Ufixed32x4 = 75, "UFIXED32_VEC4", Uint32, 4;
}

impl ElementTypeTag {
    /// Raw wire code of this tag.
    #[inline]
    pub const fn to_raw(self) -> u16 {
        self as u16
    }

    /// Scalar kind of each component.
    #[inline]
    pub const fn scalar_kind(self) -> ScalarKind {
        self.describe().0
    }

    /// Number of components per element.
    #[inline]
    pub const fn num_components(self) -> usize {
        self.describe().1 as usize
    }

    /// Size in bytes of one element.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        let (kind, comps) = self.describe();
        kind.num_bytes() * comps as usize
    }

    /// Returns true if this is a known tag.
    #[inline]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Gamma-encoded 8-bit channels.
    #[inline]
    pub const fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::UcharSrgbR | Self::UcharSrgbRa | Self::UcharSrgbRgb | Self::UcharSrgbRgba
        )
    }

    /// Fixed-point channels meant to be read as `value / max`.
    #[inline]
    pub const fn is_normalized(self) -> bool {
        matches!(
            self,
            Self::Ufixed8
                | Self::Ufixed8x2
                | Self::Ufixed8x3
                | Self::Ufixed8x4
                | Self::Ufixed16
                | Self::Ufixed16x2
                | Self::Ufixed16x3
                | Self::Ufixed16x4
                | Self::Ufixed32
                | Self::Ufixed32x2
                | Self::Ufixed32x3
                | Self::Ufixed32x4
        )
    }
}

impl fmt::Display for ElementTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Storage type of a destination attribute in the scene-graph store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Uchar,
    Uint,
    Int,
    Uint64,
    Int64,
    Half,
    Float,
    Double,
    Int2,
    Int3,
    Int4,
    Half2,
    Half3,
    Half4,
    Float2,
    Float3,
    /// Also used for RGBA color targets
    Float4,
    Double2,
    Double3,
    Double4,
    /// Half precision quaternion, stored (real, i, j, k)
    Quath,
    /// Single precision quaternion, stored (real, i, j, k)
    Quatf,
    /// Double precision quaternion, stored (real, i, j, k)
    Quatd,
    /// Resolver sentinel: no representation exists for the source
    #[default]
    Unsupported,
}

impl AttributeType {
    /// Every storable type (excluding `Unsupported`).
    pub const ALL: &'static [Self] = &[
        Self::Uchar,
        Self::Uint,
        Self::Int,
        Self::Uint64,
        Self::Int64,
        Self::Half,
        Self::Float,
        Self::Double,
        Self::Int2,
        Self::Int3,
        Self::Int4,
        Self::Half2,
        Self::Half3,
        Self::Half4,
        Self::Float2,
        Self::Float3,
        Self::Float4,
        Self::Double2,
        Self::Double3,
        Self::Double4,
        Self::Quath,
        Self::Quatf,
        Self::Quatd,
    ];

    /// Scalar kind and component count of one element.
    pub const fn describe(self) -> (ScalarKind, u8) {
        match self {
            Self::Uchar => (ScalarKind::Uint8, 1),
            Self::Uint => (ScalarKind::Uint32, 1),
            Self::Int => (ScalarKind::Int32, 1),
            Self::Uint64 => (ScalarKind::Uint64, 1),
            Self::Int64 => (ScalarKind::Int64, 1),
            Self::Half => (ScalarKind::Float16, 1),
            Self::Float => (ScalarKind::Float32, 1),
            Self::Double => (ScalarKind::Float64, 1),
            Self::Int2 => (ScalarKind::Int32, 2),
            Self::Int3 => (ScalarKind::Int32, 3),
            Self::Int4 => (ScalarKind::Int32, 4),
            Self::Half2 => (ScalarKind::Float16, 2),
            Self::Half3 => (ScalarKind::Float16, 3),
            Self::Half4 => (ScalarKind::Float16, 4),
            Self::Float2 => (ScalarKind::Float32, 2),
            Self::Float3 => (ScalarKind::Float32, 3),
            Self::Float4 => (ScalarKind::Float32, 4),
            Self::Double2 => (ScalarKind::Float64, 2),
            Self::Double3 => (ScalarKind::Float64, 3),
            Self::Double4 => (ScalarKind::Float64, 4),
            Self::Quath => (ScalarKind::Float16, 4),
            Self::Quatf => (ScalarKind::Float32, 4),
            Self::Quatd => (ScalarKind::Float64, 4),
            Self::Unsupported => (ScalarKind::Unknown, 1),
        }
    }

    /// Scene-description array type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uchar => "uchar[]",
            Self::Uint => "uint[]",
            Self::Int => "int[]",
            Self::Uint64 => "uint64[]",
            Self::Int64 => "int64[]",
            Self::Half => "half[]",
            Self::Float => "float[]",
            Self::Double => "double[]",
            Self::Int2 => "int2[]",
            Self::Int3 => "int3[]",
            Self::Int4 => "int4[]",
            Self::Half2 => "half2[]",
            Self::Half3 => "half3[]",
            Self::Half4 => "half4[]",
            Self::Float2 => "float2[]",
            Self::Float3 => "float3[]",
            Self::Float4 => "float4[]",
            Self::Double2 => "double2[]",
            Self::Double3 => "double3[]",
            Self::Double4 => "double4[]",
            Self::Quath => "quath[]",
            Self::Quatf => "quatf[]",
            Self::Quatd => "quatd[]",
            Self::Unsupported => "UNSUPPORTED",
        }
    }

    /// Scalar kind of each component.
    #[inline]
    pub const fn scalar_kind(self) -> ScalarKind {
        self.describe().0
    }

    /// Number of components per element.
    #[inline]
    pub const fn num_components(self) -> usize {
        self.describe().1 as usize
    }

    /// Returns true unless this is the `Unsupported` sentinel.
    #[inline]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    #[inline]
    pub const fn is_quaternion(self) -> bool {
        matches!(self, Self::Quath | Self::Quatf | Self::Quatd)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
