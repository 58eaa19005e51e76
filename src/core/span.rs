//! Scoped writable views over destination attribute storage.
//!
//! A [`Span`] is acquired for one attribute target, sized to exactly the
//! element count being written, filled by a conversion kernel and then
//! published with a single [`Span::commit`]. Its memory comes from a
//! [`ScratchBuffers`] set owned by the calling worker, so repeated writes
//! reuse allocations without any shared mutable state.

use super::{AttributeHandle, ElementSliceMut, SceneStore, TimeCode};
use crate::util::{Error, Result, ScalarKind};
use half::f16;
use tracing::trace;

/// Reusable scalar vectors, one per destination storage kind.
///
/// Owned by exactly one worker; never shared between threads while a span
/// borrows it.
#[derive(Debug, Default)]
pub struct ScratchBuffers {
    u8s: Vec<u8>,
    u32s: Vec<u32>,
    i32s: Vec<i32>,
    u64s: Vec<u64>,
    i64s: Vec<i64>,
    f16s: Vec<f16>,
    f32s: Vec<f32>,
    f64s: Vec<f64>,
}

#[inline]
fn sized<T: Copy + Default>(v: &mut Vec<T>, n: usize) -> &mut [T] {
    v.clear();
    v.resize(n, T::default());
    v.as_mut_slice()
}

macro_rules! for_each_scratch {
    ($self:ident, $v:ident => $body:expr) => {{
        { let $v = &mut $self.u8s; $body; }
        { let $v = &mut $self.u32s; $body; }
        { let $v = &mut $self.i32s; $body; }
        { let $v = &mut $self.u64s; $body; }
        { let $v = &mut $self.i64s; $body; }
        { let $v = &mut $self.f16s; $body; }
        { let $v = &mut $self.f32s; $body; }
        { let $v = &mut $self.f64s; $body; }
    }};
}

impl ScratchBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled run of `n` scalars of `kind`.
    fn slice_mut(&mut self, kind: ScalarKind, n: usize) -> Option<ElementSliceMut<'_>> {
        Some(match kind {
            ScalarKind::Uint8 => ElementSliceMut::Uint8(sized(&mut self.u8s, n)),
            ScalarKind::Uint32 => ElementSliceMut::Uint32(sized(&mut self.u32s, n)),
            ScalarKind::Int32 => ElementSliceMut::Int32(sized(&mut self.i32s, n)),
            ScalarKind::Uint64 => ElementSliceMut::Uint64(sized(&mut self.u64s, n)),
            ScalarKind::Int64 => ElementSliceMut::Int64(sized(&mut self.i64s, n)),
            ScalarKind::Float16 => ElementSliceMut::Float16(sized(&mut self.f16s, n)),
            ScalarKind::Float32 => ElementSliceMut::Float32(sized(&mut self.f32s, n)),
            ScalarKind::Float64 => ElementSliceMut::Float64(sized(&mut self.f64s, n)),
            _ => return None,
        })
    }

    /// Total retained capacity, in scalars, across all kinds.
    pub fn capacity(&self) -> usize {
        self.u8s.capacity()
            + self.u32s.capacity()
            + self.i32s.capacity()
            + self.u64s.capacity()
            + self.i64s.capacity()
            + self.f16s.capacity()
            + self.f32s.capacity()
            + self.f64s.capacity()
    }

    /// Release memory of any vector holding more than `limit` scalars.
    pub fn shrink_to(&mut self, limit: usize) {
        for_each_scratch!(self, v => {
            v.clear();
            if v.capacity() > limit {
                v.shrink_to(limit);
            }
        });
    }
}

/// Pre-sized writable view over one attribute target.
///
/// The filled data is not visible to any reader until [`commit`](Self::commit).
pub struct Span<'a, S: SceneStore + ?Sized> {
    store: &'a S,
    handle: AttributeHandle,
    data: ElementSliceMut<'a>,
    len: usize,
}

impl<'a, S: SceneStore + ?Sized> Span<'a, S> {
    /// Acquire a view of `count` elements on `handle`, backed by `scratch`.
    pub fn acquire(store: &'a S, scratch: &'a mut ScratchBuffers, handle: AttributeHandle, count: usize) -> Result<Self> {
        let ty = handle.attribute_type;
        let n = count
            .checked_mul(ty.num_components())
            .ok_or(Error::SizeInvariant { expected: usize::MAX, actual: count })?;
        let data = scratch
            .slice_mut(ty.scalar_kind(), n)
            .ok_or_else(|| Error::store(format!("no storage for {} attribute {}", ty, handle.path)))?;
        Ok(Self {
            store,
            handle,
            data,
            len: count,
        })
    }

    /// Destination scalars for the kernel to fill.
    #[inline]
    pub fn data(&mut self) -> &mut ElementSliceMut<'a> {
        &mut self.data
    }

    /// Number of elements (not scalars) in the view.
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn handle(&self) -> &AttributeHandle {
        &self.handle
    }

    /// Publish the view at `time`, consuming it.
    pub fn commit(self, time: TimeCode) -> Result<()> {
        trace!(path = %self.handle.path, target = %self.handle.target, %time, elements = self.len, "commit span");
        self.store.write_samples(&self.handle, time, self.data.into_slice())
    }
}
