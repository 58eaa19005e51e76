//! Typed destination storage.
//!
//! Destination attributes hold a flat run of scalars (`components * elements`)
//! of one of eight storage kinds. [`ElementBuffer`] owns such a run,
//! [`ElementSlice`] and [`ElementSliceMut`] borrow one.

use crate::util::{
    AttributeType, DQuat, DVec2, DVec3, DVec4, IVec2, IVec3, IVec4, Quat, ScalarKind, Vec2, Vec3, Vec4,
};
use half::f16;

/// Dispatch on an element container, binding the inner vector or slice.
macro_rules! with_elements {
    ($container:ident, $value:expr, $inner:ident => $body:expr) => {
        match $value {
            $container::Uint8($inner) => $body,
            $container::Uint32($inner) => $body,
            $container::Int32($inner) => $body,
            $container::Uint64($inner) => $body,
            $container::Int64($inner) => $body,
            $container::Float16($inner) => $body,
            $container::Float32($inner) => $body,
            $container::Float64($inner) => $body,
        }
    };
}

pub(crate) use with_elements;

/// Owned destination scalars.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementBuffer {
    Uint8(Vec<u8>),
    Uint32(Vec<u32>),
    Int32(Vec<i32>),
    Uint64(Vec<u64>),
    Int64(Vec<i64>),
    Float16(Vec<f16>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Borrowed destination scalars, as published by a span commit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementSlice<'a> {
    Uint8(&'a [u8]),
    Uint32(&'a [u32]),
    Int32(&'a [i32]),
    Uint64(&'a [u64]),
    Int64(&'a [i64]),
    Float16(&'a [f16]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
}

/// Mutable destination scalars, filled by a conversion kernel.
#[derive(Debug)]
pub enum ElementSliceMut<'a> {
    Uint8(&'a mut [u8]),
    Uint32(&'a mut [u32]),
    Int32(&'a mut [i32]),
    Uint64(&'a mut [u64]),
    Int64(&'a mut [i64]),
    Float16(&'a mut [f16]),
    Float32(&'a mut [f32]),
    Float64(&'a mut [f64]),
}

impl ElementBuffer {
    /// Zero-filled buffer for `len` elements of `ty`, `None` for unsupported types.
    pub fn zeroed(ty: AttributeType, len: usize) -> Option<Self> {
        let n = len * ty.num_components();
        Some(match ty.scalar_kind() {
            ScalarKind::Uint8 => Self::Uint8(vec![0; n]),
            ScalarKind::Uint32 => Self::Uint32(vec![0; n]),
            ScalarKind::Int32 => Self::Int32(vec![0; n]),
            ScalarKind::Uint64 => Self::Uint64(vec![0; n]),
            ScalarKind::Int64 => Self::Int64(vec![0; n]),
            ScalarKind::Float16 => Self::Float16(vec![f16::ZERO; n]),
            ScalarKind::Float32 => Self::Float32(vec![0.0; n]),
            ScalarKind::Float64 => Self::Float64(vec![0.0; n]),
            _ => return None,
        })
    }

    /// Storage kind of the scalars.
    pub fn scalar_kind(&self) -> ScalarKind {
        self.as_slice().scalar_kind()
    }

    /// Number of scalars held.
    pub fn num_scalars(&self) -> usize {
        with_elements!(ElementBuffer, self, v => v.len())
    }

    /// Borrow as an [`ElementSlice`].
    pub fn as_slice(&self) -> ElementSlice<'_> {
        match self {
            Self::Uint8(v) => ElementSlice::Uint8(v),
            Self::Uint32(v) => ElementSlice::Uint32(v),
            Self::Int32(v) => ElementSlice::Int32(v),
            Self::Uint64(v) => ElementSlice::Uint64(v),
            Self::Int64(v) => ElementSlice::Int64(v),
            Self::Float16(v) => ElementSlice::Float16(v),
            Self::Float32(v) => ElementSlice::Float32(v),
            Self::Float64(v) => ElementSlice::Float64(v),
        }
    }

    /// Borrow mutably as an [`ElementSliceMut`].
    pub fn as_slice_mut(&mut self) -> ElementSliceMut<'_> {
        match self {
            Self::Uint8(v) => ElementSliceMut::Uint8(v),
            Self::Uint32(v) => ElementSliceMut::Uint32(v),
            Self::Int32(v) => ElementSliceMut::Int32(v),
            Self::Uint64(v) => ElementSliceMut::Uint64(v),
            Self::Int64(v) => ElementSliceMut::Int64(v),
            Self::Float16(v) => ElementSliceMut::Float16(v),
            Self::Float32(v) => ElementSliceMut::Float32(v),
            Self::Float64(v) => ElementSliceMut::Float64(v),
        }
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Self::Uint8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&[u32]> {
        match self {
            Self::Uint32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            Self::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<&[u64]> {
        match self {
            Self::Uint64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            Self::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f16(&self) -> Option<&[f16]> {
        match self {
            Self::Float16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::Float32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            Self::Float64(v) => Some(v),
            _ => None,
        }
    }

    // === glam read-back ===

    /// Float scalars viewed as `Vec2`.
    pub fn as_vec2s(&self) -> Option<&[Vec2]> {
        self.as_f32().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    /// Float scalars viewed as `Vec3`.
    pub fn as_vec3s(&self) -> Option<&[Vec3]> {
        self.as_f32().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    /// Float scalars copied out as `Vec4` (RGBA colors).
    ///
    /// `Vec4` is 16-byte aligned, so this copies instead of casting.
    pub fn to_vec4s(&self) -> Option<Vec<Vec4>> {
        let v = self.as_f32()?;
        if v.len() % 4 != 0 {
            return None;
        }
        Some(v.chunks_exact(4).map(Vec4::from_slice).collect())
    }

    pub fn as_dvec2s(&self) -> Option<&[DVec2]> {
        self.as_f64().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    pub fn as_dvec3s(&self) -> Option<&[DVec3]> {
        self.as_f64().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    pub fn as_dvec4s(&self) -> Option<&[DVec4]> {
        self.as_f64().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    pub fn as_ivec2s(&self) -> Option<&[IVec2]> {
        self.as_i32().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    pub fn as_ivec3s(&self) -> Option<&[IVec3]> {
        self.as_i32().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    pub fn as_ivec4s(&self) -> Option<&[IVec4]> {
        self.as_i32().and_then(|v| bytemuck::try_cast_slice(v).ok())
    }

    /// Quaternions stored as (real, i, j, k), widened to single precision.
    pub fn to_quats(&self) -> Option<Vec<Quat>> {
        let widened: Vec<f32> = match self {
            Self::Float16(v) => v.iter().map(|h| h.to_f32()).collect(),
            Self::Float32(v) => v.clone(),
            Self::Float64(v) => v.iter().map(|&d| d as f32).collect(),
            _ => return None,
        };
        if widened.len() % 4 != 0 {
            return None;
        }
        Some(
            widened
                .chunks_exact(4)
                .map(|q| Quat::from_xyzw(q[1], q[2], q[3], q[0]))
                .collect(),
        )
    }

    /// Double precision quaternions stored as (real, i, j, k).
    pub fn to_dquats(&self) -> Option<Vec<DQuat>> {
        let v = self.as_f64()?;
        if v.len() % 4 != 0 {
            return None;
        }
        Some(v.chunks_exact(4).map(|q| DQuat::from_xyzw(q[1], q[2], q[3], q[0])).collect())
    }
}

impl<'a> ElementSlice<'a> {
    /// Storage kind of the scalars.
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            Self::Uint8(_) => ScalarKind::Uint8,
            Self::Uint32(_) => ScalarKind::Uint32,
            Self::Int32(_) => ScalarKind::Int32,
            Self::Uint64(_) => ScalarKind::Uint64,
            Self::Int64(_) => ScalarKind::Int64,
            Self::Float16(_) => ScalarKind::Float16,
            Self::Float32(_) => ScalarKind::Float32,
            Self::Float64(_) => ScalarKind::Float64,
        }
    }

    /// Number of scalars.
    pub fn num_scalars(&self) -> usize {
        with_elements!(ElementSlice, self, v => v.len())
    }

    /// Copy into an owned buffer.
    pub fn to_buffer(&self) -> ElementBuffer {
        match *self {
            Self::Uint8(v) => ElementBuffer::Uint8(v.to_vec()),
            Self::Uint32(v) => ElementBuffer::Uint32(v.to_vec()),
            Self::Int32(v) => ElementBuffer::Int32(v.to_vec()),
            Self::Uint64(v) => ElementBuffer::Uint64(v.to_vec()),
            Self::Int64(v) => ElementBuffer::Int64(v.to_vec()),
            Self::Float16(v) => ElementBuffer::Float16(v.to_vec()),
            Self::Float32(v) => ElementBuffer::Float32(v.to_vec()),
            Self::Float64(v) => ElementBuffer::Float64(v.to_vec()),
        }
    }
}

impl<'a> ElementSliceMut<'a> {
    /// Storage kind of the scalars.
    pub fn scalar_kind(&self) -> ScalarKind {
        self.as_slice().scalar_kind()
    }

    /// Number of scalars.
    pub fn num_scalars(&self) -> usize {
        with_elements!(ElementSliceMut, self, v => v.len())
    }

    /// Reborrow immutably.
    pub fn as_slice(&self) -> ElementSlice<'_> {
        match self {
            Self::Uint8(v) => ElementSlice::Uint8(v),
            Self::Uint32(v) => ElementSlice::Uint32(v),
            Self::Int32(v) => ElementSlice::Int32(v),
            Self::Uint64(v) => ElementSlice::Uint64(v),
            Self::Int64(v) => ElementSlice::Int64(v),
            Self::Float16(v) => ElementSlice::Float16(v),
            Self::Float32(v) => ElementSlice::Float32(v),
            Self::Float64(v) => ElementSlice::Float64(v),
        }
    }

    /// Consume into an immutable slice with the same lifetime.
    pub fn into_slice(self) -> ElementSlice<'a> {
        match self {
            Self::Uint8(v) => ElementSlice::Uint8(v),
            Self::Uint32(v) => ElementSlice::Uint32(v),
            Self::Int32(v) => ElementSlice::Int32(v),
            Self::Uint64(v) => ElementSlice::Uint64(v),
            Self::Int64(v) => ElementSlice::Int64(v),
            Self::Float16(v) => ElementSlice::Float16(v),
            Self::Float32(v) => ElementSlice::Float32(v),
            Self::Float64(v) => ElementSlice::Float64(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_sizes() {
        let buf = ElementBuffer::zeroed(AttributeType::Float3, 4).unwrap();
        assert_eq!(buf.num_scalars(), 12);
        assert_eq!(buf.scalar_kind(), ScalarKind::Float32);
        assert!(ElementBuffer::zeroed(AttributeType::Unsupported, 4).is_none());
    }

    #[test]
    fn test_vec_readback() {
        let buf = ElementBuffer::Float32(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = buf.as_vec3s().unwrap();
        assert_eq!(v, &[Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert!(buf.to_vec4s().is_none());
    }

    #[test]
    fn test_quat_readback_reorders_real_part() {
        let buf = ElementBuffer::Float32(vec![4.0, 1.0, 2.0, 3.0]);
        let q = buf.to_quats().unwrap()[0];
        assert_eq!((q.x, q.y, q.z, q.w), (1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_slice_roundtrip() {
        let mut buf = ElementBuffer::Int32(vec![1, 2, 3]);
        {
            let slice = buf.as_slice_mut();
            assert_eq!(slice.num_scalars(), 3);
            assert_eq!(slice.scalar_kind(), ScalarKind::Int32);
        }
        assert_eq!(buf.as_slice().to_buffer(), buf);
    }
}
