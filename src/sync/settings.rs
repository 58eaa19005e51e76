//! Synchronizer settings

use crate::util::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning knobs for a synchronization pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Allow processing batch entries on the rayon pool
    pub parallel: bool,
    /// Batches with fewer entries run sequentially
    pub parallel_min_entries: usize,
    /// Scratch vectors larger than this many scalars are released after a batch
    pub scratch_retain_elements: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_entries: 64,
            scratch_retain_elements: 1 << 20,
        }
    }
}

impl SyncSettings {
    /// Sequential settings, mostly for deterministic tests.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.parallel_min_entries == 0 {
            return Err(Error::InvalidSettings("parallel_min_entries must be at least 1".into()));
        }
        Ok(())
    }

    /// Whether a batch of `entries` goes to the rayon pool.
    #[inline]
    pub fn use_parallel(&self, entries: usize) -> bool {
        self.parallel && entries >= self.parallel_min_entries
    }
}
