//! Explicit, user-initiated saves.
//!
//! ```text
//! Ready ──save──▶ Saving ──ok──▶ Ready   (baseline advances, last_saved_at = now)
//!                        └─err─▶ Ready   (nothing in memory changes)
//! ```
//!
//! A save stamps `lastModified` on a copy of the document and writes it to the
//! committed slot plus the timestamp slot. Only once that succeeds is the stamp
//! copied onto the live document and the dirty baseline moved. The draft slot is
//! refreshed with the same copy so both slots agree after a save; that write is
//! best effort since the save of record has already landed.
//!
//! A pending autosave is left armed.

use crate::dirty::DirtyTracker;
use crate::error::Result;
use crate::model::Document;
use crate::notify::{Notice, Notifier};
use crate::store::{DraftStore, KvBackend};
use chrono::{DateTime, Utc};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Ready,
    Saving,
}

#[derive(Debug, Clone)]
pub struct SaveController {
    state: SaveState,
    last_saved_at: Option<DateTime<Utc>>,
}

impl SaveController {
    pub fn new(last_saved_at: Option<DateTime<Utc>>) -> Self {
        Self {
            state: SaveState::Ready,
            last_saved_at,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn is_saving(&self) -> bool {
        self.state == SaveState::Saving
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn forget_last_save(&mut self) {
        self.last_saved_at = None;
    }

    /// Commit `doc` at `now`. See the module docs for the exact sequence.
    pub fn commit<B: KvBackend>(
        &mut self,
        store: &DraftStore<B>,
        doc: &mut Document,
        dirty: &mut DirtyTracker,
        now: DateTime<Utc>,
        notifier: Option<&dyn Notifier>,
    ) -> Result<Document> {
        self.state = SaveState::Saving;
        let outcome = persist(store, doc, now);
        self.state = SaveState::Ready;

        match outcome {
            Ok(committed) => {
                doc.last_modified = committed.last_modified;
                dirty.rebase(&committed);
                self.last_saved_at = Some(now);
                debug!(at = %now, "committed document");
                if let Some(notifier) = notifier {
                    notifier.notify(&Notice::success("Resume saved"));
                }
                Ok(committed)
            }
            Err(e) => {
                if let Some(notifier) = notifier {
                    notifier.notify(&Notice::error(format!("Could not save resume: {}", e)));
                }
                Err(e)
            }
        }
    }
}

impl Default for SaveController {
    fn default() -> Self {
        Self::new(None)
    }
}

fn persist<B: KvBackend>(
    store: &DraftStore<B>,
    doc: &Document,
    now: DateTime<Utc>,
) -> Result<Document> {
    let mut committed = doc.clone();
    committed.last_modified = Some(now);
    store.write_committed(&committed, now)?;
    store.write_draft(&committed);
    Ok(committed)
}
