//! In-memory scene store.
//!
//! Reference implementation of [`SceneStore`] used by tests and by callers
//! that want to inspect what a synchronization pass wrote.

use super::{AttributeHandle, ElementBuffer, ElementSlice, SceneStore, TargetMode, TimeCode};
use crate::util::{AttributeType, Error, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Value stored at one coordinate of an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleValue {
    /// Element data.
    Data(ElementBuffer),
    /// Explicit "no value" marker.
    NoValue,
}

impl SampleValue {
    #[inline]
    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }

    /// Element data, `None` for the marker.
    #[inline]
    pub fn data(&self) -> Option<&ElementBuffer> {
        match self {
            Self::Data(buf) => Some(buf),
            Self::NoValue => None,
        }
    }
}

#[derive(Debug)]
struct StoredAttribute {
    attribute_type: AttributeType,
    samples: BTreeMap<TimeCode, SampleValue>,
}

type AttributeKey = (String, TargetMode);

/// Thread-safe in-memory attribute store.
///
/// Uses `parking_lot::RwLock` for the attribute table and an `AtomicUsize`
/// write counter readable without locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    attributes: RwLock<HashMap<AttributeKey, StoredAttribute>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample stored at `(path, target, time)`.
    pub fn sample(&self, path: &str, target: TargetMode, time: TimeCode) -> Option<SampleValue> {
        let attrs = self.attributes.read();
        attrs
            .get(&(path.to_string(), target))
            .and_then(|a| a.samples.get(&time).cloned())
    }

    /// All coordinates written to `(path, target)`, in time order.
    pub fn times(&self, path: &str, target: TargetMode) -> Vec<TimeCode> {
        let attrs = self.attributes.read();
        attrs
            .get(&(path.to_string(), target))
            .map(|a| a.samples.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Storage type of `(path, target)` if it exists.
    pub fn attribute_type(&self, path: &str, target: TargetMode) -> Option<AttributeType> {
        let attrs = self.attributes.read();
        attrs.get(&(path.to_string(), target)).map(|a| a.attribute_type)
    }

    /// Check if the attribute exists.
    pub fn has_attribute(&self, path: &str, target: TargetMode) -> bool {
        self.attributes.read().contains_key(&(path.to_string(), target))
    }

    /// True when any coordinate of `(path, target)` holds element data.
    pub fn is_live(&self, path: &str, target: TargetMode) -> bool {
        let attrs = self.attributes.read();
        attrs
            .get(&(path.to_string(), target))
            .is_some_and(|a| a.samples.values().any(|s| !s.is_no_value()))
    }

    /// Number of physical attributes.
    pub fn num_attributes(&self) -> usize {
        self.attributes.read().len()
    }

    /// Number of sample and marker writes performed so far.
    #[inline]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Drop every attribute.
    pub fn clear(&self) {
        self.attributes.write().clear();
    }

    fn put(&self, handle: &AttributeHandle, time: TimeCode, value: SampleValue) -> Result<()> {
        let mut attrs = self.attributes.write();
        let attr = attrs
            .get_mut(&(handle.path.to_string(), handle.target))
            .ok_or_else(|| Error::AttributeNotFound(format!("{} ({})", handle.path, handle.target)))?;
        if attr.attribute_type != handle.attribute_type {
            return Err(Error::store(format!(
                "stale handle for {}: attribute is {}, handle is {}",
                handle.path, attr.attribute_type, handle.attribute_type
            )));
        }
        attr.samples.insert(time, value);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

impl SceneStore for MemoryStore {
    fn get_or_create_attribute(
        &self,
        path: &str,
        target: TargetMode,
        attribute_type: AttributeType,
    ) -> Result<AttributeHandle> {
        if !attribute_type.is_supported() {
            return Err(Error::store(format!("cannot create {} as {}", path, attribute_type)));
        }
        let mut attrs = self.attributes.write();
        let entry = attrs
            .entry((path.to_string(), target))
            .or_insert_with(|| StoredAttribute {
                attribute_type,
                samples: BTreeMap::new(),
            });
        // Retyping drops every sample of the old type.
        if entry.attribute_type != attribute_type {
            entry.attribute_type = attribute_type;
            entry.samples.clear();
        }
        Ok(AttributeHandle::new(path, target, attribute_type))
    }

    fn write_samples(&self, handle: &AttributeHandle, time: TimeCode, data: ElementSlice<'_>) -> Result<()> {
        if data.scalar_kind() != handle.attribute_type.scalar_kind() {
            return Err(Error::store(format!(
                "{} data written to {} attribute {}",
                data.scalar_kind(),
                handle.attribute_type,
                handle.path
            )));
        }
        let comps = handle.attribute_type.num_components();
        if data.num_scalars() % comps != 0 {
            return Err(Error::SizeInvariant {
                expected: data.num_scalars() - data.num_scalars() % comps,
                actual: data.num_scalars(),
            });
        }
        self.put(handle, time, SampleValue::Data(data.to_buffer()))
    }

    fn write_no_value(&self, handle: &AttributeHandle, time: TimeCode) -> Result<()> {
        self.put(handle, time, SampleValue::NoValue)
    }

    fn remove_attribute(&self, path: &str) -> Result<()> {
        let mut attrs = self.attributes.write();
        let constant = attrs.remove(&(path.to_string(), TargetMode::Constant));
        let sampled = attrs.remove(&(path.to_string(), TargetMode::TimeSampled));
        if constant.is_none() && sampled.is_none() {
            return Err(Error::AttributeNotFound(path.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_write() {
        let store = MemoryStore::new();
        let h = store
            .get_or_create_attribute("/mesh/points", TargetMode::Constant, AttributeType::Float3)
            .unwrap();
        store
            .write_samples(&h, TimeCode::Default, ElementSlice::Float32(&[1.0, 2.0, 3.0]))
            .unwrap();

        let s = store.sample("/mesh/points", TargetMode::Constant, TimeCode::Default).unwrap();
        assert_eq!(s.data().unwrap().as_f32().unwrap(), &[1.0, 2.0, 3.0]);
        assert!(store.is_live("/mesh/points", TargetMode::Constant));
        assert!(!store.is_live("/mesh/points", TargetMode::TimeSampled));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_no_value_is_not_live() {
        let store = MemoryStore::new();
        let h = store
            .get_or_create_attribute("/a", TargetMode::TimeSampled, AttributeType::Float)
            .unwrap();
        store.write_no_value(&h, TimeCode::at(1.0)).unwrap();
        assert!(!store.is_live("/a", TargetMode::TimeSampled));
        assert_eq!(store.times("/a", TargetMode::TimeSampled), vec![TimeCode::at(1.0)]);
    }

    #[test]
    fn test_retype_replaces_attribute() {
        let store = MemoryStore::new();
        let h = store.get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Float).unwrap();
        store.write_samples(&h, TimeCode::Default, ElementSlice::Float32(&[1.0])).unwrap();

        let h2 = store.get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Int).unwrap();
        assert_eq!(store.attribute_type("/a", TargetMode::Constant), Some(AttributeType::Int));
        assert!(store.sample("/a", TargetMode::Constant, TimeCode::Default).is_none());

        // The old handle is stale now.
        assert!(store.write_no_value(&h, TimeCode::Default).is_err());
        assert!(store.write_no_value(&h2, TimeCode::Default).is_ok());
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let store = MemoryStore::new();
        let h = store.get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Float2).unwrap();
        assert!(store.write_samples(&h, TimeCode::Default, ElementSlice::Int32(&[1, 2])).is_err());
        assert!(store.write_samples(&h, TimeCode::Default, ElementSlice::Float32(&[1.0])).is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_remove_attribute() {
        let store = MemoryStore::new();
        store.get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Float).unwrap();
        store.get_or_create_attribute("/a", TargetMode::TimeSampled, AttributeType::Float).unwrap();
        assert_eq!(store.num_attributes(), 2);
        store.remove_attribute("/a").unwrap();
        assert_eq!(store.num_attributes(), 0);
        assert!(matches!(store.remove_attribute("/a"), Err(Error::AttributeNotFound(_))));
    }

    #[test]
    fn test_clear_drops_everything() {
        let store = MemoryStore::new();
        let h = store.get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Float).unwrap();
        store.write_samples(&h, TimeCode::Default, ElementSlice::Float32(&[1.0])).unwrap();
        store.get_or_create_attribute("/b", TargetMode::TimeSampled, AttributeType::Int).unwrap();

        store.clear();
        assert_eq!(store.num_attributes(), 0);
        assert!(!store.has_attribute("/a", TargetMode::Constant));
        assert!(store.write_no_value(&h, TimeCode::Default).is_err());
    }

    #[test]
    fn test_unsupported_type_not_created() {
        let store = MemoryStore::new();
        assert!(store
            .get_or_create_attribute("/a", TargetMode::Constant, AttributeType::Unsupported)
            .is_err());
        assert_eq!(store.num_attributes(), 0);
    }
}
