//! Capability interface of the scene-graph store.
//!
//! The bridge never persists anything itself; it creates attributes and
//! writes samples through this trait.

use super::{ElementSlice, TimeCode};
use crate::util::{AttributeType, Result};
use std::fmt;
use std::sync::Arc;

/// Physical target of a logical attribute slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetMode {
    /// Single value written at the `Default` coordinate.
    Constant,
    /// Per-time-coordinate samples.
    TimeSampled,
}

impl TargetMode {
    /// Pick the target for a field's time-varying classification.
    #[inline]
    pub const fn select(time_varying: bool) -> Self {
        if time_varying {
            Self::TimeSampled
        } else {
            Self::Constant
        }
    }

    /// The other target of the same slot.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Constant => Self::TimeSampled,
            Self::TimeSampled => Self::Constant,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::TimeSampled => "time-sampled",
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one physical attribute in the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeHandle {
    /// Logical slot path.
    pub path: Arc<str>,
    /// Which physical target of the slot.
    pub target: TargetMode,
    /// Storage type the attribute was created with.
    pub attribute_type: AttributeType,
}

impl AttributeHandle {
    pub fn new(path: impl Into<Arc<str>>, target: TargetMode, attribute_type: AttributeType) -> Self {
        Self {
            path: path.into(),
            target,
            attribute_type,
        }
    }
}

/// Writer interface for a scene-graph store.
///
/// Implementations must tolerate concurrent calls for *different*
/// attributes; the bridge never issues concurrent writes to the same one.
pub trait SceneStore: Send + Sync {
    /// Get the attribute at `(path, target)`, creating it with `attribute_type`
    /// if missing. An existing attribute of another type is replaced.
    fn get_or_create_attribute(
        &self,
        path: &str,
        target: TargetMode,
        attribute_type: AttributeType,
    ) -> Result<AttributeHandle>;

    /// Write element data at a coordinate.
    fn write_samples(&self, handle: &AttributeHandle, time: TimeCode, data: ElementSlice<'_>) -> Result<()>;

    /// Write an explicit "no value" marker at a coordinate.
    fn write_no_value(&self, handle: &AttributeHandle, time: TimeCode) -> Result<()>;

    /// Remove both targets of a slot. Called by the owning entity's
    /// lifecycle, never by the synchronizer.
    fn remove_attribute(&self, path: &str) -> Result<()>;
}

impl<S: SceneStore + ?Sized> SceneStore for Arc<S> {
    fn get_or_create_attribute(
        &self,
        path: &str,
        target: TargetMode,
        attribute_type: AttributeType,
    ) -> Result<AttributeHandle> {
        (**self).get_or_create_attribute(path, target, attribute_type)
    }

    fn write_samples(&self, handle: &AttributeHandle, time: TimeCode, data: ElementSlice<'_>) -> Result<()> {
        (**self).write_samples(handle, time, data)
    }

    fn write_no_value(&self, handle: &AttributeHandle, time: TimeCode) -> Result<()> {
        (**self).write_no_value(handle, time)
    }

    fn remove_attribute(&self, path: &str) -> Result<()> {
        (**self).remove_attribute(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        assert_eq!(TargetMode::select(true), TargetMode::TimeSampled);
        assert_eq!(TargetMode::select(false), TargetMode::Constant);
        assert_eq!(TargetMode::Constant.other(), TargetMode::TimeSampled);
        assert_eq!(TargetMode::TimeSampled.to_string(), "time-sampled");
    }
}
