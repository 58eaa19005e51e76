//! Scalar kinds - the fundamental storage atoms of every element type.

use bytemuck::Pod;
use half::f16;
use std::fmt;

/// Scalar storage kind of a single component.
///
/// Every source tag and destination attribute type is built from one of
/// these plus a component count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ScalarKind {
    /// Unsigned 8-bit integer
    Uint8 = 0,
    /// Signed 8-bit integer
    Int8 = 1,
    /// Unsigned 16-bit integer
    Uint16 = 2,
    /// Signed 16-bit integer
    Int16 = 3,
    /// Unsigned 32-bit integer
    Uint32 = 4,
    /// Signed 32-bit integer
    Int32 = 5,
    /// Unsigned 64-bit integer
    Uint64 = 6,
    /// Signed 64-bit integer
    Int64 = 7,
    /// 16-bit floating point (IEEE 754 half precision)
    Float16 = 8,
    /// 32-bit floating point
    Float32 = 9,
    /// 64-bit floating point
    Float64 = 10,
    /// Unknown/invalid kind
    #[default]
    Unknown = 127,
}

impl ScalarKind {
    /// Returns the size in bytes of one scalar of this kind.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 | Self::Float16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
            Self::Uint64 | Self::Int64 | Self::Float64 => 8,
            Self::Unknown => 0,
        }
    }

    /// Returns the name of this kind as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Int8 => "int8",
            Self::Uint16 => "uint16",
            Self::Int16 => "int16",
            Self::Uint32 => "uint32",
            Self::Int32 => "int32",
            Self::Uint64 => "uint64",
            Self::Int64 => "int64",
            Self::Float16 => "half",
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns true if this is an integer kind.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Uint8
                | Self::Int8
                | Self::Uint16
                | Self::Int16
                | Self::Uint32
                | Self::Int32
                | Self::Uint64
                | Self::Int64
        )
    }

    /// Returns true if this is a floating point kind.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }

    /// Returns true for signed integer and floating point kinds.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Float16 | Self::Float32 | Self::Float64
        )
    }

    /// True when values of `self` can be copied bytewise into storage of `other`.
    ///
    /// Identical kinds always qualify. Same-width integers that differ only in
    /// signedness are declared interchangeable (e.g. `int8` and `uint8`).
    #[inline]
    pub const fn storage_compatible(self, other: Self) -> bool {
        if self as u8 == other as u8 {
            return !matches!(self, Self::Unknown);
        }
        self.is_integer() && other.is_integer() && self.num_bytes() == other.num_bytes()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Scalar trait for typed conversion ===

/// Rust scalar types that can appear in a source array or destination buffer.
///
/// Integer to integer casts go through `i128` and never lose range before the
/// final `as` cast; anything involving a float goes through `f64`.
pub trait Scalar: Pod + Copy + Default + PartialEq + Send + Sync + 'static {
    /// The corresponding [`ScalarKind`].
    const KIND: ScalarKind;

    /// Largest representable value, widened to f64.
    const MAX_F64: f64;

    /// Widen to f64.
    fn to_f64(self) -> f64;

    /// Narrow from f64 (saturating for integers).
    fn from_f64(v: f64) -> Self;

    /// Integer value as i128, `None` for floats.
    fn to_i128(self) -> Option<i128>;

    /// Narrow from i128.
    fn from_i128(v: i128) -> Self;

    /// Value-preserving cast into another scalar type.
    #[inline]
    fn cast<D: Scalar>(self) -> D {
        match self.to_i128() {
            Some(i) => D::from_i128(i),
            None => D::from_f64(self.to_f64()),
        }
    }
}

macro_rules! impl_int_scalar {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Scalar for $t {
                const KIND: ScalarKind = ScalarKind::$kind;
                const MAX_F64: f64 = <$t>::MAX as f64;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn to_i128(self) -> Option<i128> {
                    Some(self as i128)
                }

                #[inline]
                fn from_i128(v: i128) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_int_scalar!(
    u8 => Uint8,
    i8 => Int8,
    u16 => Uint16,
    i16 => Int16,
    u32 => Uint32,
    i32 => Int32,
    u64 => Uint64,
    i64 => Int64,
);

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float32;
    const MAX_F64: f64 = f32::MAX as f64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_i128(self) -> Option<i128> {
        None
    }

    #[inline]
    fn from_i128(v: i128) -> Self {
        v as f32
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;
    const MAX_F64: f64 = f64::MAX;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_i128(self) -> Option<i128> {
        None
    }

    #[inline]
    fn from_i128(v: i128) -> Self {
        v as f64
    }
}

impl Scalar for f16 {
    const KIND: ScalarKind = ScalarKind::Float16;
    const MAX_F64: f64 = 65504.0;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        f16::from_f64(v)
    }

    #[inline]
    fn to_i128(self) -> Option<i128> {
        None
    }

    #[inline]
    fn from_i128(v: i128) -> Self {
        f16::from_f64(v as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sizes() {
        assert_eq!(ScalarKind::Uint8.num_bytes(), 1);
        assert_eq!(ScalarKind::Int16.num_bytes(), 2);
        assert_eq!(ScalarKind::Float16.num_bytes(), 2);
        assert_eq!(ScalarKind::Uint32.num_bytes(), 4);
        assert_eq!(ScalarKind::Float64.num_bytes(), 8);
        assert_eq!(ScalarKind::Unknown.num_bytes(), 0);
    }

    #[test]
    fn test_storage_compatibility() {
        assert!(ScalarKind::Int8.storage_compatible(ScalarKind::Uint8));
        assert!(ScalarKind::Uint32.storage_compatible(ScalarKind::Int32));
        assert!(ScalarKind::Float32.storage_compatible(ScalarKind::Float32));
        assert!(!ScalarKind::Uint16.storage_compatible(ScalarKind::Uint32));
        assert!(!ScalarKind::Int32.storage_compatible(ScalarKind::Float32));
        assert!(!ScalarKind::Unknown.storage_compatible(ScalarKind::Unknown));
    }

    #[test]
    fn test_kind_classification() {
        assert!(ScalarKind::Int8.is_signed());
        assert!(ScalarKind::Float16.is_signed());
        assert!(!ScalarKind::Uint16.is_signed());
        assert!(!ScalarKind::Unknown.is_signed());
        assert!(ScalarKind::Float64.is_float() && !ScalarKind::Int64.is_float());
    }

    #[test]
    fn test_cast() {
        assert_eq!(65535u16.cast::<u32>(), 65535);
        assert_eq!((-3i16).cast::<i32>(), -3);
        assert_eq!(1.5f64.cast::<f32>(), 1.5);
        assert_eq!(2.0f32.cast::<f16>(), f16::from_f32(2.0));
        assert_eq!(u64::MAX.cast::<u64>(), u64::MAX);
        assert_eq!(7i64.cast::<f64>(), 7.0);
        assert_eq!(2.75f64.cast::<i32>(), 2);
    }

    #[test]
    fn test_max_values() {
        assert_eq!(u8::MAX_F64, 255.0);
        assert_eq!(u32::MAX_F64, 4294967295.0);
    }
}
