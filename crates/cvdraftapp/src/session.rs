//! # Editor Session
//!
//! [`EditorSession`] is the single handle a UI holds while a resume is being edited.
//! It owns the in-memory [`Document`] and wires together the pieces that keep it
//! persisted:
//!
//! ```text
//!   UI ──mutate/replace/edit──▶ EditorSession ──on_mutate──▶ AutosaveScheduler
//!   UI ──poll (event loop)────▶ EditorSession ──due?──▶ DraftStore::write_draft
//!   UI ──save─────────────────▶ SaveController ──▶ DraftStore::write_committed
//!                                               └─▶ DirtyTracker::rebase
//! ```
//!
//! ## Driving Autosave
//!
//! The session never spawns timers. The host event loop calls [`EditorSession::poll`]
//! whenever it gets a chance (every frame, tick or input event); a due autosave
//! fires from there. [`EditorSession::flush`] writes a pending autosave right away
//! and is meant for session end.
//!
//! ## Observables
//!
//! - [`EditorSession::is_saving`]: true only while a save is in flight.
//! - [`EditorSession::last_saved_at`]: time of the last successful explicit save,
//!   restored from the timestamp slot at startup.
//! - [`EditorSession::has_unsaved_changes`]: the live document differs from the
//!   last committed copy (or nothing has been committed yet).
//!
//! ## Known Limitation
//!
//! Two sessions on the same storage key overwrite each other's slots. There is no
//! versioning or conflict detection.

use crate::autosave::AutosaveScheduler;
use crate::bootstrap::{hydrate, HydrationSource};
use crate::clock::{Clock, SystemClock};
use crate::config::SessionOptions;
use crate::dirty::DirtyTracker;
use crate::error::Result;
use crate::model::{Document, DocumentPatch};
use crate::notify::{LogNotifier, Notifier};
use crate::save::SaveController;
use crate::store::{DraftStore, KvBackend, StorageNamespace};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Point-in-time view of the session flags, for status bars and `status` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub storage_key: String,
    pub hydrated_from: HydrationSource,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub last_autosave_at: Option<DateTime<Utc>>,
    pub autosave_due_at: Option<DateTime<Utc>>,
}

pub struct EditorSession<B: KvBackend, C: Clock = SystemClock> {
    store: DraftStore<B>,
    clock: C,
    document: Document,
    dirty: DirtyTracker,
    autosave: AutosaveScheduler,
    saver: SaveController,
    notifier: Box<dyn Notifier>,
    hydrated_from: HydrationSource,
    last_autosave_at: Option<DateTime<Utc>>,
}

impl<B: KvBackend, C: Clock> EditorSession<B, C> {
    /// Start a session: hydrate from storage (see [`crate::bootstrap`]) and arm nothing.
    ///
    /// Fails if the storage key is blank or the backend cannot store one of the
    /// slot keys derived from it.
    pub fn initialize(
        backend: B,
        clock: C,
        initial: Document,
        options: &SessionOptions,
    ) -> Result<Self> {
        let namespace = StorageNamespace::new(&options.storage_key)?;
        let store = DraftStore::new(backend, namespace);
        store.validate()?;
        let hydrated = hydrate(&store, initial);

        Ok(Self {
            store,
            clock,
            document: hydrated.document,
            dirty: DirtyTracker::from_baseline(hydrated.baseline.as_ref()),
            autosave: AutosaveScheduler::new(options.autosave_interval),
            saver: SaveController::new(hydrated.last_saved_at),
            notifier: Box::new(LogNotifier),
            hydrated_from: hydrated.source,
            last_autosave_at: None,
        })
    }

    /// Replace the notifier used by `save(true)`.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply a partial update.
    pub fn mutate(&mut self, patch: DocumentPatch) {
        patch.apply(&mut self.document);
        self.touch();
    }

    /// Replace the whole document. `last_modified` is kept from the current document,
    /// since only a save may change it.
    pub fn replace(&mut self, mut doc: Document) {
        doc.last_modified = self.document.last_modified;
        self.document = doc;
        self.touch();
    }

    /// Mutate the document in place. Changes to `last_modified` are discarded.
    pub fn edit<F: FnOnce(&mut Document)>(&mut self, f: F) {
        let last_modified = self.document.last_modified;
        f(&mut self.document);
        self.document.last_modified = last_modified;
        self.touch();
    }

    /// Fire the autosave if its quiet period has elapsed.
    /// Returns whether the draft slot was written.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        if self.autosave.take_due(now) {
            self.write_draft(now)
        } else {
            false
        }
    }

    /// Write a pending autosave immediately instead of waiting for its deadline.
    /// Returns whether the draft slot was written; `false` if nothing was pending.
    pub fn flush(&mut self) -> bool {
        if self.autosave.cancel() {
            let now = self.clock.now();
            self.write_draft(now)
        } else {
            false
        }
    }

    /// Commit the document to the committed and timestamp slots.
    ///
    /// With `notify`, a success or failure [`Notice`](crate::notify::Notice) is sent
    /// to the session's notifier. On failure the document is left as is and
    /// `has_unsaved_changes` keeps reporting true.
    pub fn save(&mut self, notify: bool) -> Result<Document> {
        let now = self.clock.now();
        let notifier = if notify {
            Some(self.notifier.as_ref())
        } else {
            None
        };
        self.saver.commit(
            &self.store,
            &mut self.document,
            &mut self.dirty,
            now,
            notifier,
        )
    }

    /// The committed copy as currently stored.
    pub fn load_saved(&self) -> Option<Document> {
        self.store.read_committed()
    }

    /// The working draft as currently stored.
    pub fn load_draft(&self) -> Option<Document> {
        self.store.read_draft()
    }

    /// Discard in-memory edits and continue from the committed copy.
    /// Returns false (and changes nothing) if no committed copy exists.
    pub fn revert_to_saved(&mut self) -> bool {
        match self.store.read_committed() {
            Some(saved) => {
                self.document = saved;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove all three slots and forget the last save.
    ///
    /// A pending autosave is cancelled so it cannot recreate the draft afterwards.
    /// The in-memory document is kept; with no committed copy left it counts as
    /// unsaved.
    pub fn clear_storage(&mut self) -> Result<()> {
        self.store.clear()?;
        self.autosave.cancel();
        self.saver.forget_last_save();
        self.dirty.reset();
        self.last_autosave_at = None;
        debug!(key = self.store.namespace().base(), "cleared storage");
        Ok(())
    }

    pub fn is_saving(&self) -> bool {
        self.saver.is_saving()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.saver.last_saved_at()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.has_unsaved_changes(&self.document)
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_armed()
    }

    pub fn last_autosave_at(&self) -> Option<DateTime<Utc>> {
        self.last_autosave_at
    }

    pub fn hydrated_from(&self) -> HydrationSource {
        self.hydrated_from
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            storage_key: self.store.namespace().base().to_string(),
            hydrated_from: self.hydrated_from,
            is_saving: self.is_saving(),
            has_unsaved_changes: self.has_unsaved_changes(),
            last_saved_at: self.last_saved_at(),
            last_autosave_at: self.last_autosave_at,
            autosave_due_at: self.autosave.deadline(),
        }
    }

    pub fn store(&self) -> &DraftStore<B> {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// End the session and hand back the backend. Pending autosaves are dropped;
    /// call [`flush`](Self::flush) first to keep them.
    pub fn into_backend(self) -> B {
        self.store.into_backend()
    }

    fn touch(&mut self) {
        self.autosave.on_mutate(self.clock.now());
    }

    fn write_draft(&mut self, now: DateTime<Utc>) -> bool {
        let written = self.store.write_draft(&self.document);
        if written {
            self.last_autosave_at = Some(now);
        }
        written
    }
}
