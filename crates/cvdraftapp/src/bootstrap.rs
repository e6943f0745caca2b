//! Session startup: choosing which persisted copy to edit.
//!
//! Precedence for the working document:
//!
//! 1. **Draft slot**: the latest autosave, assumed newer than anything else.
//! 2. **Committed slot**: the last explicit save.
//! 3. **Initial document** supplied by the caller.
//!
//! The dirty baseline is always the committed slot, whichever source won, so
//! "unsaved changes" is measured against the last explicit save. A draft that
//! differs from the committed copy therefore shows as unsaved right after startup.
//!
//! Unreadable or corrupt slots count as absent and the order falls through.

use crate::model::Document;
use crate::store::{DraftStore, KvBackend};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationSource {
    Draft,
    Committed,
    Initial,
}

impl fmt::Display for HydrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HydrationSource::Draft => "draft",
            HydrationSource::Committed => "saved copy",
            HydrationSource::Initial => "new document",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Hydrated {
    pub document: Document,
    pub source: HydrationSource,
    /// Committed copy, used as the dirty baseline.
    pub baseline: Option<Document>,
    pub last_saved_at: Option<DateTime<Utc>>,
}

pub fn hydrate<B: KvBackend>(store: &DraftStore<B>, initial: Document) -> Hydrated {
    let baseline = store.read_committed();
    let last_saved_at = store.read_timestamp();

    let (document, source) = match store.read_draft() {
        Some(draft) => (draft, HydrationSource::Draft),
        None => match &baseline {
            Some(committed) => (committed.clone(), HydrationSource::Committed),
            None => (initial, HydrationSource::Initial),
        },
    };

    debug!(
        key = store.namespace().base(),
        source = %source,
        has_baseline = baseline.is_some(),
        "hydrated editor session"
    );

    Hydrated {
        document,
        source,
        baseline,
        last_saved_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::StorageNamespace;

    fn store() -> DraftStore<MemBackend> {
        DraftStore::new(MemBackend::new(), StorageNamespace::new("cv").unwrap())
    }

    fn doc_named(name: &str) -> Document {
        let mut doc = Document::new();
        doc.personal_info.name = name.to_string();
        doc
    }

    #[test]
    fn test_initial_when_nothing_stored() {
        let hydrated = hydrate(&store(), doc_named("Init"));
        assert_eq!(hydrated.source, HydrationSource::Initial);
        assert_eq!(hydrated.document, doc_named("Init"));
        assert_eq!(hydrated.baseline, None);
        assert_eq!(hydrated.last_saved_at, None);
    }

    #[test]
    fn test_draft_wins_over_committed() {
        let store = store();
        let at = DateTime::from_timestamp_millis(42).unwrap();
        store.write_committed(&doc_named("Y"), at).unwrap();
        store.write_draft(&doc_named("X"));

        let hydrated = hydrate(&store, doc_named("Init"));
        assert_eq!(hydrated.source, HydrationSource::Draft);
        assert_eq!(hydrated.document, doc_named("X"));
        assert_eq!(hydrated.baseline, Some(doc_named("Y")));
        assert_eq!(hydrated.last_saved_at, Some(at));
    }

    #[test]
    fn test_committed_when_no_draft() {
        let store = store();
        store
            .write_committed(&doc_named("Y"), chrono::Utc::now())
            .unwrap();

        let hydrated = hydrate(&store, doc_named("Init"));
        assert_eq!(hydrated.source, HydrationSource::Committed);
        assert_eq!(hydrated.document, doc_named("Y"));
    }

    #[test]
    fn test_corrupt_draft_falls_through() {
        let store = store();
        store.write_committed(&doc_named("Y"), chrono::Utc::now()).unwrap();
        store.backend().set("cv", "]]").unwrap();

        let hydrated = hydrate(&store, doc_named("Init"));
        assert_eq!(hydrated.source, HydrationSource::Committed);
        assert_eq!(hydrated.document, doc_named("Y"));
    }

    #[test]
    fn test_unreadable_storage_uses_initial() {
        let store = store();
        store.write_draft(&doc_named("X"));
        store.backend().set_simulate_read_error(true);

        let hydrated = hydrate(&store, doc_named("Init"));
        assert_eq!(hydrated.source, HydrationSource::Initial);
        assert_eq!(hydrated.baseline, None);
    }
}
