//! Per-commit routing of attribute data into constant or time-sampled targets.

use super::{CommitBatch, CommitEntry, DestinationSlot, SlotType, SyncSettings};
use crate::convert::{convert, resolve_destination_type, resolve_rule};
use crate::core::{SceneStore, ScratchBuffers, Span, TargetMode, TimeCode, TypedArrayView};
use crate::util::{AttributeType, Chrono, ElementTypeTag, Error, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, debug_span, trace, warn};

/// Result of synchronizing one slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotOutcome {
    /// Data converted and committed.
    Written { target: TargetMode, elements: usize },
    /// A "no value" marker was written to `target`.
    Cleared { target: TargetMode },
    /// Nothing written to the selected target.
    Skipped,
    /// No conversion rule takes the source into the destination type.
    TypeMismatch {
        source: ElementTypeTag,
        destination: AttributeType,
    },
    /// No destination representation exists; no attribute was created.
    UnsupportedSourceType(ElementTypeTag),
    /// The store rejected an operation.
    StoreFailed(String),
}

impl SlotOutcome {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::UnsupportedSourceType(_) | Self::StoreFailed(_)
        )
    }
}

impl From<Error> for SlotOutcome {
    fn from(err: Error) -> Self {
        match err {
            Error::TypeMismatch { source_type, dest_type } => Self::TypeMismatch {
                source: source_type,
                destination: dest_type,
            },
            Error::UnsupportedSourceType(tag) => Self::UnsupportedSourceType(tag),
            other => Self::StoreFailed(other.to_string()),
        }
    }
}

/// Outcome of one batch entry, in entry order.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotReport {
    pub path: Arc<str>,
    pub outcome: SlotOutcome,
    /// Non-selected target cleared before the write, if it held data.
    pub cleared: Option<TargetMode>,
}

/// Outcome counts of a batch, for a single log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub written: usize,
    pub cleared: usize,
    pub skipped: usize,
    pub mismatched: usize,
    pub unsupported: usize,
    pub failed: usize,
    /// Stale targets cleared ahead of a write.
    pub stale_cleared: usize,
}

impl SyncSummary {
    pub fn from_reports(reports: &[SlotReport]) -> Self {
        let mut s = Self::default();
        for r in reports {
            match r.outcome {
                SlotOutcome::Written { .. } => s.written += 1,
                SlotOutcome::Cleared { .. } => s.cleared += 1,
                SlotOutcome::Skipped => s.skipped += 1,
                SlotOutcome::TypeMismatch { .. } => s.mismatched += 1,
                SlotOutcome::UnsupportedSourceType(_) => s.unsupported += 1,
                SlotOutcome::StoreFailed(_) => s.failed += 1,
            }
            if r.cleared.is_some() {
                s.stale_cleared += 1;
            }
        }
        s
    }

    /// No entry reported an error.
    pub fn is_clean(&self) -> bool {
        self.mismatched == 0 && self.unsupported == 0 && self.failed == 0
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} cleared, {} skipped, {} stale cleared, {} mismatched, {} unsupported, {} failed",
            self.written, self.cleared, self.skipped, self.stale_cleared, self.mismatched, self.unsupported, self.failed
        )
    }
}

/// Routes commit batches into a [`SceneStore`].
pub struct Synchronizer<S: SceneStore> {
    store: S,
    settings: SyncSettings,
    /// Scratch for sequential passes. Parallel workers own their own.
    scratch: Mutex<ScratchBuffers>,
}

impl<S: SceneStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            settings: SyncSettings::default(),
            scratch: Mutex::new(ScratchBuffers::new()),
        }
    }

    /// Create with validated settings.
    pub fn with_settings(store: S, settings: SyncSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            store,
            settings,
            scratch: Mutex::new(ScratchBuffers::new()),
        })
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Process every entry of `batch`.
    ///
    /// Errors are per entry: one failing slot never stops its siblings.
    /// The returned reports are in entry order.
    pub fn synchronize(&self, batch: CommitBatch<'_>) -> Vec<SlotReport> {
        let (time, entries) = batch.into_parts();
        let _span = debug_span!("synchronize", time, entries = entries.len()).entered();

        let store = &self.store;
        let reports: Vec<SlotReport> = if self.settings.use_parallel(entries.len()) {
            entries
                .into_par_iter()
                .map_init(ScratchBuffers::new, |scratch, entry| sync_entry(store, scratch, time, entry))
                .collect()
        } else {
            let mut scratch = self.scratch.lock();
            let reports: Vec<SlotReport> = entries
                .into_iter()
                .map(|entry| sync_entry(store, &mut *scratch, time, entry))
                .collect();
            scratch.shrink_to(self.settings.scratch_retain_elements);
            reports
        };

        debug!(summary = %SyncSummary::from_reports(&reports), "batch synchronized");
        reports
    }
}

fn sync_entry<S: SceneStore + ?Sized>(
    store: &S,
    scratch: &mut ScratchBuffers,
    time: Chrono,
    entry: CommitEntry<'_>,
) -> SlotReport {
    let CommitEntry {
        slot,
        source,
        performs_update,
        time_varying,
    } = entry;
    let selected = TargetMode::select(time_varying);
    let coordinate = if time_varying { TimeCode::at(time) } else { TimeCode::Default };

    let mut report = SlotReport {
        path: slot.shared_path(),
        outcome: SlotOutcome::Skipped,
        cleared: None,
    };

    // The stale target goes first, whatever happens to the selected one.
    let stale = selected.other();
    if slot.is_live(stale) {
        if let Err(e) = clear_target(store, slot, stale) {
            warn!(path = slot.path(), target = %stale, error = %e, "failed to clear stale target");
            report.outcome = e.into();
            return report;
        }
        report.cleared = Some(stale);
    }

    if !performs_update {
        return report;
    }

    let result = match source {
        Some(view) => write_data(store, scratch, slot, selected, coordinate, &view),
        None => write_no_value(store, slot, selected, coordinate),
    };
    report.outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            match &e {
                Error::TypeMismatch { source_type, dest_type } => {
                    warn!(path = slot.path(), source = %source_type, destination = %dest_type, "type mismatch, attribute not written")
                }
                Error::UnsupportedSourceType(tag) => {
                    warn!(path = slot.path(), source = %tag, "unsupported source type, attribute not created")
                }
                _ => warn!(path = slot.path(), error = %e, "attribute write failed"),
            }
            e.into()
        }
    };
    report
}

/// Write "no value" at every live coordinate of `target`.
fn clear_target<S: SceneStore + ?Sized>(store: &S, slot: &mut DestinationSlot, target: TargetMode) -> Result<()> {
    let Some(ty) = slot.created_type() else {
        slot.record_cleared(target);
        return Ok(());
    };
    let handle = store.get_or_create_attribute(slot.path(), target, ty)?;
    for time in slot.live_coordinates(target) {
        store.write_no_value(&handle, time)?;
        slot.record_no_value(target, time);
    }
    debug!(path = slot.path(), %target, "cleared stale target");
    Ok(())
}

fn write_no_value<S: SceneStore + ?Sized>(
    store: &S,
    slot: &mut DestinationSlot,
    target: TargetMode,
    time: TimeCode,
) -> Result<SlotOutcome> {
    // A resolving slot that never received data has nothing to mark.
    let Some(ty) = slot.attribute_type() else {
        trace!(path = slot.path(), "no data and no attribute yet");
        return Ok(SlotOutcome::Skipped);
    };
    let handle = store.get_or_create_attribute(slot.path(), target, ty)?;
    slot.record_type(target, ty);
    store.write_no_value(&handle, time)?;
    slot.record_no_value(target, time);
    trace!(path = slot.path(), %target, %time, "wrote no value");
    Ok(SlotOutcome::Cleared { target })
}

fn write_data<S: SceneStore + ?Sized>(
    store: &S,
    scratch: &mut ScratchBuffers,
    slot: &mut DestinationSlot,
    target: TargetMode,
    time: TimeCode,
    view: &TypedArrayView<'_>,
) -> Result<SlotOutcome> {
    let tag = view.tag();
    if !tag.is_defined() {
        return Err(Error::UnsupportedSourceType(tag));
    }
    let dest = match slot.slot_type() {
        SlotType::Fixed(ty) => ty,
        SlotType::Resolve => resolve_destination_type(tag),
    };
    if !dest.is_supported() {
        return Err(Error::UnsupportedSourceType(tag));
    }
    let rule = resolve_rule(tag, dest)?;

    let handle = store.get_or_create_attribute(slot.path(), target, dest)?;
    slot.record_type(target, dest);

    let elements = rule.destination_len(view.len());
    let mut span = Span::acquire(store, scratch, handle, elements)?;
    convert(view, dest, span.data(), rule)?;
    span.commit(time)?;
    slot.record_write(target, time);

    trace!(path = slot.path(), %target, %time, %rule, elements, "wrote attribute");
    Ok(SlotOutcome::Written { target, elements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStore;

    fn floats(v: &[f32]) -> TypedArrayView<'_> {
        TypedArrayView::from_slice(v, ElementTypeTag::Float3).unwrap()
    }

    #[test]
    fn test_constant_write() {
        let sync = Synchronizer::new(MemoryStore::new());
        let mut slot = DestinationSlot::resolving("/p");
        let data = [1.0f32, 2.0, 3.0];

        let mut batch = CommitBatch::new(0.0);
        batch.add_entry(&mut slot, Some(floats(&data)), true, false);
        let reports = sync.synchronize(batch);

        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0].outcome,
            SlotOutcome::Written { target: TargetMode::Constant, elements: 1 }
        );
        assert_eq!(reports[0].cleared, None);
        assert_eq!(slot.live_target(), Some(TargetMode::Constant));
        assert_eq!(sync.store().attribute_type("/p", TargetMode::Constant), Some(AttributeType::Float3));
    }

    #[test]
    fn test_no_update_skips() {
        let sync = Synchronizer::new(MemoryStore::new());
        let mut slot = DestinationSlot::resolving("/p");
        let mut batch = CommitBatch::new(0.0);
        batch.add_entry(&mut slot, None, false, true);
        let reports = sync.synchronize(batch);
        assert_eq!(reports[0].outcome, SlotOutcome::Skipped);
        assert_eq!(sync.store().num_attributes(), 0);
    }

    #[test]
    fn test_no_update_still_clears_stale_target() {
        let sync = Synchronizer::new(MemoryStore::new());
        let mut slot = DestinationSlot::resolving("/p");
        let data = [1.0f32, 2.0, 3.0];

        let mut batch = CommitBatch::new(1.0);
        batch.add_entry(&mut slot, Some(floats(&data)), true, true);
        sync.synchronize(batch);

        let mut batch = CommitBatch::new(2.0);
        batch.add_entry(&mut slot, None, false, false);
        let reports = sync.synchronize(batch);

        assert_eq!(reports[0].outcome, SlotOutcome::Skipped);
        assert_eq!(reports[0].cleared, Some(TargetMode::TimeSampled));
        let s = sync
            .store()
            .sample("/p", TargetMode::TimeSampled, TimeCode::at(1.0))
            .unwrap();
        assert!(s.is_no_value());
    }

    #[test]
    fn test_outcome_from_error() {
        let o: SlotOutcome = Error::mismatch(ElementTypeTag::Int3, AttributeType::Float4).into();
        assert_eq!(
            o,
            SlotOutcome::TypeMismatch { source: ElementTypeTag::Int3, destination: AttributeType::Float4 }
        );
        assert!(o.is_error());
        let o: SlotOutcome = Error::store("disk full").into();
        assert!(matches!(o, SlotOutcome::StoreFailed(ref m) if m.contains("disk full")));
    }

    #[test]
    fn test_summary() {
        let reports = vec![
            SlotReport { path: "/a".into(), outcome: SlotOutcome::Skipped, cleared: Some(TargetMode::Constant) },
            SlotReport {
                path: "/b".into(),
                outcome: SlotOutcome::Written { target: TargetMode::Constant, elements: 3 },
                cleared: None,
            },
            SlotReport {
                path: "/c".into(),
                outcome: SlotOutcome::UnsupportedSourceType(ElementTypeTag::Undefined),
                cleared: None,
            },
        ];
        let s = SyncSummary::from_reports(&reports);
        assert_eq!((s.written, s.skipped, s.unsupported, s.stale_cleared), (1, 1, 1, 1));
        assert!(!s.is_clean());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = SyncSettings {
            parallel_min_entries: 0,
            ..SyncSettings::default()
        };
        assert!(Synchronizer::with_settings(MemoryStore::new(), settings).is_err());
    }
}
