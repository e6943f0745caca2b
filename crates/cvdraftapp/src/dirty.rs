//! Unsaved-change detection.
//!
//! The tracker keeps a structural snapshot of the last **committed** document and
//! compares the live document against it. Both sides go through the same
//! `serde_json::to_value` rules, so field order or representation never produces a
//! spurious difference. Autosaves never move the baseline: a pending or completed
//! draft write does not change the answer.

use crate::model::Document;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    baseline: Option<Value>,
}

impl DirtyTracker {
    /// A tracker with no committed baseline; everything counts as unsaved.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_baseline(committed: Option<&Document>) -> Self {
        let mut tracker = Self::new();
        if let Some(doc) = committed {
            tracker.rebase(doc);
        }
        tracker
    }

    /// Make `committed` the new baseline.
    pub fn rebase(&mut self, committed: &Document) {
        self.baseline = snapshot(committed);
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn has_unsaved_changes(&self, current: &Document) -> bool {
        match (&self.baseline, snapshot(current)) {
            (Some(base), Some(live)) => *base != live,
            _ => true,
        }
    }
}

fn snapshot(doc: &Document) -> Option<Value> {
    match serde_json::to_value(doc) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "could not snapshot document, assuming unsaved changes");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn doc_named(name: &str) -> Document {
        let mut doc = Document::new();
        doc.personal_info.name = name.to_string();
        doc
    }

    #[test]
    fn test_no_baseline_is_dirty() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.has_baseline());
        assert!(tracker.has_unsaved_changes(&Document::new()));
    }

    #[test]
    fn test_equal_document_is_clean() {
        let tracker = DirtyTracker::from_baseline(Some(&doc_named("Ali")));
        assert!(!tracker.has_unsaved_changes(&doc_named("Ali")));
        assert!(tracker.has_unsaved_changes(&doc_named("Sara")));
    }

    #[test]
    fn test_rebase_moves_baseline() {
        let mut tracker = DirtyTracker::from_baseline(Some(&doc_named("Ali")));
        tracker.rebase(&doc_named("Sara"));
        assert!(!tracker.has_unsaved_changes(&doc_named("Sara")));
        assert!(tracker.has_unsaved_changes(&doc_named("Ali")));
    }

    #[test]
    fn test_nested_entry_changes_are_detected() {
        let mut base = Document::new();
        base.experience = vec![json!({"company": "Acme", "years": 2})];
        let tracker = DirtyTracker::from_baseline(Some(&base));

        let mut same = Document::new();
        same.experience = vec![json!({"years": 2, "company": "Acme"})];
        assert!(!tracker.has_unsaved_changes(&same));

        let mut changed = Document::new();
        changed.experience = vec![json!({"company": "Acme", "years": 3})];
        assert!(tracker.has_unsaved_changes(&changed));
    }

    #[test]
    fn test_last_modified_is_part_of_the_comparison() {
        let mut base = doc_named("Ali");
        base.last_modified = Some(Utc::now());
        let tracker = DirtyTracker::from_baseline(Some(&base));
        assert!(tracker.has_unsaved_changes(&doc_named("Ali")));
        assert!(!tracker.has_unsaved_changes(&base));
    }

    #[test]
    fn test_reset_drops_baseline() {
        let mut tracker = DirtyTracker::from_baseline(Some(&doc_named("Ali")));
        tracker.reset();
        assert!(tracker.has_unsaved_changes(&doc_named("Ali")));
    }
}
