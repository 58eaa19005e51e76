//! Commit batches and per-field masks.

use super::DestinationSlot;
use crate::core::TypedArrayView;
use crate::util::Chrono;

/// Bitmask over caller-defined field ids (0..64).
///
/// The owning entity keeps one mask for "this field was updated" and one
/// for "this field is time-varying" and hands both to
/// [`CommitBatch::add_field`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldMask(u64);

impl FieldMask {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(u64::MAX);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Mask with `field` set. Ids of 64 and above are ignored.
    #[inline]
    pub const fn with(self, field: u32) -> Self {
        if field < 64 {
            Self(self.0 | (1 << field))
        } else {
            self
        }
    }

    #[inline]
    pub fn set(&mut self, field: u32, on: bool) {
        if field >= 64 {
            return;
        }
        if on {
            self.0 |= 1 << field;
        } else {
            self.0 &= !(1 << field);
        }
    }

    #[inline]
    pub const fn contains(self, field: u32) -> bool {
        field < 64 && self.0 & (1 << field) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One (slot, data, classification) triple of a batch.
#[derive(Debug)]
pub struct CommitEntry<'a> {
    pub slot: &'a mut DestinationSlot,
    /// Source data; `None` with `performs_update` marks the target "no value".
    pub source: Option<TypedArrayView<'a>>,
    /// New data (or explicit absence) supplied this commit.
    pub performs_update: bool,
    /// Field is classified time-sampled this commit.
    pub time_varying: bool,
}

/// The unit of work of one synchronization pass.
///
/// Built right before a pass and consumed by it. Holding every slot by
/// mutable borrow rules out two entries for the same slot.
#[derive(Debug)]
pub struct CommitBatch<'a> {
    time: Chrono,
    entries: Vec<CommitEntry<'a>>,
}

impl<'a> CommitBatch<'a> {
    /// Empty batch committing time-sampled data at `time`.
    pub fn new(time: Chrono) -> Self {
        Self {
            time,
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(time: Chrono, capacity: usize) -> Self {
        Self {
            time,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Add an entry with explicit flags.
    pub fn add_entry(
        &mut self,
        slot: &'a mut DestinationSlot,
        source: Option<TypedArrayView<'a>>,
        performs_update: bool,
        time_varying: bool,
    ) -> &mut Self {
        self.entries.push(CommitEntry {
            slot,
            source,
            performs_update,
            time_varying,
        });
        self
    }

    /// Add an entry whose flags come from the entity's field masks.
    pub fn add_field(
        &mut self,
        slot: &'a mut DestinationSlot,
        field: u32,
        source: Option<TypedArrayView<'a>>,
        update_mask: &FieldMask,
        time_mask: &FieldMask,
    ) -> &mut Self {
        self.add_entry(slot, source, update_mask.contains(field), time_mask.contains(field))
    }

    #[inline]
    pub fn time(&self) -> Chrono {
        self.time
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CommitEntry<'a>] {
        &self.entries
    }

    pub(crate) fn into_parts(self) -> (Chrono, Vec<CommitEntry<'a>>) {
        (self.time, self.entries)
    }
}
