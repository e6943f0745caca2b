use crate::error::Result;

/// Abstract interface for the host's durable key-value medium.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`DraftStore`](super::draft_store::DraftStore) handles the "what" (slots,
/// serialization, error policy).
///
/// All methods take `&self`; implementations use interior mutability where they
/// need it. Failures surface as [`DraftError::StorageUnavailable`](crate::error::DraftError)
/// and are never retried here.
pub trait KvBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic: a reader sees either the old or the new value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Check that `key` can be stored at all, before anything is written.
    /// Backends that accept any string keep the default.
    fn validate_key(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
