use super::backend::KvBackend;
use super::namespace::{Slot, StorageNamespace};
use crate::error::{DraftError, Result};
use crate::model::Document;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Reads and writes the three slots of one storage namespace.
pub struct DraftStore<B: KvBackend> {
    /// The underlying key-value backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    namespace: StorageNamespace,
}

impl<B: KvBackend> DraftStore<B> {
    pub fn new(backend: B, namespace: StorageNamespace) -> Self {
        Self { backend, namespace }
    }

    pub fn namespace(&self) -> &StorageNamespace {
        &self.namespace
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Persist `doc` to the working-draft slot.
    ///
    /// Best effort: failures are logged and reported as `false`, never raised.
    pub fn write_draft(&self, doc: &Document) -> bool {
        match self.write_document(Slot::Draft, doc) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    key = self.namespace.key(Slot::Draft),
                    error = %e,
                    "autosave of working draft failed"
                );
                false
            }
        }
    }

    /// Check every slot key against the backend, so an unusable key fails at
    /// startup instead of on the first write.
    pub fn validate(&self) -> Result<()> {
        for slot in Slot::ALL {
            self.backend.validate_key(self.namespace.key(slot))?;
        }
        Ok(())
    }

    /// Persist `doc` to the committed slot and `at` to the timestamp slot.
    ///
    /// The two writes land together or not at all: if the timestamp write fails,
    /// the previous committed value is put back (or the slot removed if there was
    /// none) before the error is returned. The previous value has to be readable
    /// for the save to start.
    pub fn write_committed(&self, doc: &Document, at: DateTime<Utc>) -> Result<()> {
        let committed_key = self.namespace.key(Slot::Committed);
        let previous = self.backend.get(committed_key)?;

        self.write_document(Slot::Committed, doc)?;
        let key = self.namespace.key(Slot::Timestamp);
        if let Err(e) = self.backend.set(key, &at.timestamp_millis().to_string()) {
            self.restore_committed(previous.as_deref());
            return Err(e);
        }
        debug!(key, at = %at, "wrote save timestamp");
        Ok(())
    }

    fn restore_committed(&self, previous: Option<&str>) {
        let key = self.namespace.key(Slot::Committed);
        let restored = match previous {
            Some(raw) => self.backend.set(key, raw),
            None => self.backend.remove(key),
        };
        match restored {
            Ok(()) => debug!(key, "rolled back committed slot"),
            Err(e) => warn!(key, error = %e, "could not roll back committed slot"),
        }
    }

    pub fn read_draft(&self) -> Option<Document> {
        self.read_document(Slot::Draft)
    }

    pub fn read_committed(&self) -> Option<Document> {
        self.read_document(Slot::Committed)
    }

    /// Time of the last explicit save, if one was recorded and is readable.
    pub fn read_timestamp(&self) -> Option<DateTime<Utc>> {
        let key = self.namespace.key(Slot::Timestamp);
        let raw = self.read_raw(Slot::Timestamp)?;
        match parse_timestamp(key, &raw) {
            Ok(at) => Some(at),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable save timestamp");
                None
            }
        }
    }

    /// Remove all three slots.
    ///
    /// Every slot is attempted even if an earlier removal fails; the first error
    /// is returned.
    pub fn clear(&self) -> Result<()> {
        let mut first_err = None;
        for slot in Slot::ALL {
            let key = self.namespace.key(slot);
            if let Err(e) = self.backend.remove(key) {
                warn!(key, error = %e, "failed to remove slot");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Like `read_draft`/`read_committed`, but reports why a slot is unusable
    /// instead of treating it as absent.
    pub fn try_read(&self, slot: Slot) -> Result<Option<Document>> {
        let key = self.namespace.key(slot);
        match self.backend.get(key)? {
            None => Ok(None),
            Some(raw) => parse_document(key, &raw).map(Some),
        }
    }

    fn write_document(&self, slot: Slot, doc: &Document) -> Result<()> {
        let key = self.namespace.key(slot);
        let raw = serde_json::to_string(doc)?;
        self.backend.set(key, &raw)?;
        debug!(key, bytes = raw.len(), "wrote {} slot", slot.name());
        Ok(())
    }

    fn read_document(&self, slot: Slot) -> Option<Document> {
        let key = self.namespace.key(slot);
        let raw = self.read_raw(slot)?;
        match parse_document(key, &raw) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(key, error = %e, "treating corrupt {} slot as absent", slot.name());
                None
            }
        }
    }

    fn read_raw(&self, slot: Slot) -> Option<String> {
        let key = self.namespace.key(slot);
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "treating unreadable {} slot as absent", slot.name());
                None
            }
        }
    }
}

fn parse_document(key: &str, raw: &str) -> Result<Document> {
    serde_json::from_str(raw).map_err(|e| DraftError::StorageParse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn parse_timestamp(key: &str, raw: &str) -> Result<DateTime<Utc>> {
    let parse_err = |reason: String| DraftError::StorageParse {
        key: key.to_string(),
        reason,
    };
    let millis: i64 = raw.trim().parse().map_err(|e| parse_err(format!("{e}")))?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| parse_err(format!("timestamp out of range: {millis}")))
}
