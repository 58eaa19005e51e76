//! Borrowed, typed view over a caller-owned source array.

use crate::util::{ElementTypeTag, Error, Result, Scalar};
use bytemuck::Pod;

/// Untyped source bytes plus the tag and element count describing them.
///
/// The memory belongs to the caller; the view only borrows it for the
/// duration of one conversion.
#[derive(Clone, Copy, Debug)]
pub struct TypedArrayView<'a> {
    data: &'a [u8],
    tag: ElementTypeTag,
    len: usize,
}

impl<'a> TypedArrayView<'a> {
    /// Create a view over `len` elements of type `tag`.
    ///
    /// Fails with [`Error::SizeInvariant`] when the buffer is shorter than
    /// `len * tag.num_bytes()`.
    pub fn new(data: &'a [u8], tag: ElementTypeTag, len: usize) -> Result<Self> {
        let expected = len
            .checked_mul(tag.num_bytes())
            .ok_or(Error::SizeInvariant { expected: usize::MAX, actual: data.len() })?;
        if data.len() < expected {
            return Err(Error::SizeInvariant { expected, actual: data.len() });
        }
        Ok(Self { data: &data[..expected], tag, len })
    }

    /// Create a view over a typed slice, deriving the element count from its
    /// byte length.
    pub fn from_slice<T: Pod>(values: &'a [T], tag: ElementTypeTag) -> Result<Self> {
        let data: &[u8] = bytemuck::cast_slice(values);
        let elem = tag.num_bytes();
        if elem == 0 {
            return Self::new(data, tag, 0);
        }
        if data.len() % elem != 0 {
            return Err(Error::SizeInvariant { expected: data.len() - data.len() % elem, actual: data.len() });
        }
        Self::new(data, tag, data.len() / elem)
    }

    /// Source element type tag.
    #[inline]
    pub fn tag(&self) -> ElementTypeTag {
        self.tag
    }

    /// Number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw bytes covered by the view.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of scalar atoms (`len * components`).
    #[inline]
    pub fn num_scalars(&self) -> usize {
        self.len * self.tag.num_components()
    }

    /// Iterate the scalar atoms as `S`, tolerating unaligned storage.
    ///
    /// `S::KIND` must match the tag's scalar kind.
    pub fn scalars<S: Scalar>(&self) -> impl Iterator<Item = S> + 'a {
        debug_assert_eq!(S::KIND, self.tag.scalar_kind());
        self.data
            .chunks_exact(std::mem::size_of::<S>())
            .map(bytemuck::pod_read_unaligned::<S>)
    }
}
