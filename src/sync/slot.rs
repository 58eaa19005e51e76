//! Logical attribute slots.
//!
//! A [`DestinationSlot`] names one logical attribute with two physical
//! targets in the store (constant and time-sampled). The slot remembers
//! which of them currently hold data so that a later commit can clear the
//! stale one.

use crate::core::{TargetMode, TimeCode};
use crate::util::{AttributeType, Chrono};
use smallvec::SmallVec;
use std::sync::Arc;

/// How a slot picks its destination storage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SlotType {
    /// Resolved from the source tag on every write (generic primvars).
    #[default]
    Resolve,
    /// Imposed by the attribute's role.
    Fixed(AttributeType),
}

/// Well-known attribute roles and the storage type they impose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Color,
    Points,
    Normals,
    Indices,
    Scales,
    Widths,
    Orientations,
    Texcoords,
}

impl SlotRole {
    pub const fn attribute_type(self) -> AttributeType {
        match self {
            Self::Color => AttributeType::Float4,
            Self::Points | Self::Normals | Self::Scales => AttributeType::Float3,
            Self::Indices => AttributeType::Int,
            Self::Widths => AttributeType::Float,
            Self::Orientations => AttributeType::Quath,
            Self::Texcoords => AttributeType::Float2,
        }
    }
}

/// One logical attribute and the write state of its two targets.
///
/// Owned by the entity the attribute belongs to. A commit batch borrows it
/// mutably, so no two entries of one batch can touch the same slot.
#[derive(Clone, Debug)]
pub struct DestinationSlot {
    path: Arc<str>,
    slot_type: SlotType,
    created_type: Option<AttributeType>,
    constant_live: bool,
    /// Coordinates of the time-sampled target holding data.
    sampled_times: SmallVec<[Chrono; 4]>,
}

impl DestinationSlot {
    pub fn new(path: impl Into<Arc<str>>, slot_type: SlotType) -> Self {
        Self {
            path: path.into(),
            slot_type,
            created_type: None,
            constant_live: false,
            sampled_times: SmallVec::new(),
        }
    }

    /// Slot whose type follows the source data.
    pub fn resolving(path: impl Into<Arc<str>>) -> Self {
        Self::new(path, SlotType::Resolve)
    }

    /// Slot with a fixed storage type.
    pub fn fixed(path: impl Into<Arc<str>>, attribute_type: AttributeType) -> Self {
        Self::new(path, SlotType::Fixed(attribute_type))
    }

    /// Slot for a well-known role.
    pub fn for_role(path: impl Into<Arc<str>>, role: SlotRole) -> Self {
        Self::fixed(path, role.attribute_type())
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn shared_path(&self) -> Arc<str> {
        Arc::clone(&self.path)
    }

    #[inline]
    pub fn slot_type(&self) -> SlotType {
        self.slot_type
    }

    /// Type the store attributes were last created with.
    #[inline]
    pub fn created_type(&self) -> Option<AttributeType> {
        self.created_type
    }

    /// Type to use for a write that carries no source data.
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self.slot_type {
            SlotType::Fixed(ty) => Some(self.created_type.unwrap_or(ty)),
            SlotType::Resolve => self.created_type,
        }
    }

    /// True when `target` holds data at some coordinate.
    pub fn is_live(&self, target: TargetMode) -> bool {
        match target {
            TargetMode::Constant => self.constant_live,
            TargetMode::TimeSampled => !self.sampled_times.is_empty(),
        }
    }

    /// The target holding data, if any.
    pub fn live_target(&self) -> Option<TargetMode> {
        if self.constant_live {
            Some(TargetMode::Constant)
        } else if !self.sampled_times.is_empty() {
            Some(TargetMode::TimeSampled)
        } else {
            None
        }
    }

    /// Coordinates of the time-sampled target that hold data.
    pub fn sampled_times(&self) -> &[Chrono] {
        &self.sampled_times
    }

    /// Coordinates a clear of `target` has to mark.
    pub(crate) fn live_coordinates(&self, target: TargetMode) -> SmallVec<[TimeCode; 4]> {
        match target {
            TargetMode::Constant if self.constant_live => SmallVec::from_elem(TimeCode::Default, 1),
            TargetMode::Constant => SmallVec::new(),
            TargetMode::TimeSampled => self.sampled_times.iter().map(|&t| TimeCode::at(t)).collect(),
        }
    }

    /// Record the storage type of a write. A type change drops the data the
    /// store discarded on `target`.
    pub(crate) fn record_type(&mut self, target: TargetMode, attribute_type: AttributeType) {
        if self.created_type.is_some_and(|t| t != attribute_type) {
            self.record_cleared(target);
        }
        self.created_type = Some(attribute_type);
    }

    pub(crate) fn record_write(&mut self, target: TargetMode, time: TimeCode) {
        match (target, time) {
            (TargetMode::Constant, _) => self.constant_live = true,
            (TargetMode::TimeSampled, TimeCode::Time(t)) => {
                if !self.sampled_times.iter().any(|&s| s.total_cmp(&t).is_eq()) {
                    self.sampled_times.push(t);
                }
            }
            (TargetMode::TimeSampled, TimeCode::Default) => {}
        }
    }

    pub(crate) fn record_no_value(&mut self, target: TargetMode, time: TimeCode) {
        match (target, time) {
            (TargetMode::Constant, _) => self.constant_live = false,
            (TargetMode::TimeSampled, TimeCode::Time(t)) => self.sampled_times.retain(|s| s.total_cmp(&t).is_ne()),
            (TargetMode::TimeSampled, TimeCode::Default) => {}
        }
    }

    pub(crate) fn record_cleared(&mut self, target: TargetMode) {
        match target {
            TargetMode::Constant => self.constant_live = false,
            TargetMode::TimeSampled => self.sampled_times.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_types() {
        assert_eq!(SlotRole::Color.attribute_type(), AttributeType::Float4);
        assert_eq!(SlotRole::Orientations.attribute_type(), AttributeType::Quath);
        let slot = DestinationSlot::for_role("/pts/widths", SlotRole::Widths);
        assert_eq!(slot.slot_type(), SlotType::Fixed(AttributeType::Float));
        assert_eq!(slot.attribute_type(), Some(AttributeType::Float));
        assert_eq!(DestinationSlot::resolving("/p").attribute_type(), None);
    }

    #[test]
    fn test_write_records() {
        let mut slot = DestinationSlot::resolving("/mesh/primvars:uv");
        assert_eq!(slot.live_target(), None);

        slot.record_write(TargetMode::TimeSampled, TimeCode::at(1.0));
        slot.record_write(TargetMode::TimeSampled, TimeCode::at(2.0));
        slot.record_write(TargetMode::TimeSampled, TimeCode::at(1.0));
        assert_eq!(slot.sampled_times(), &[1.0, 2.0]);
        assert_eq!(slot.live_target(), Some(TargetMode::TimeSampled));

        slot.record_no_value(TargetMode::TimeSampled, TimeCode::at(1.0));
        assert_eq!(slot.sampled_times(), &[2.0]);
        assert_eq!(
            slot.live_coordinates(TargetMode::TimeSampled).as_slice(),
            &[TimeCode::at(2.0)]
        );

        slot.record_cleared(TargetMode::TimeSampled);
        assert!(!slot.is_live(TargetMode::TimeSampled));
        assert!(slot.live_coordinates(TargetMode::Constant).is_empty());
    }

    #[test]
    fn test_retype_drops_target_records() {
        let mut slot = DestinationSlot::resolving("/a");
        slot.record_type(TargetMode::Constant, AttributeType::Float);
        slot.record_write(TargetMode::Constant, TimeCode::Default);
        slot.record_type(TargetMode::Constant, AttributeType::Float);
        assert!(slot.is_live(TargetMode::Constant));

        slot.record_type(TargetMode::Constant, AttributeType::Double);
        assert!(!slot.is_live(TargetMode::Constant));
        assert_eq!(slot.created_type(), Some(AttributeType::Double));
    }
}
