use crate::error::{DraftError, Result};

const COMMITTED_SUFFIX: &str = "_saved";
const TIMESTAMP_SUFFIX: &str = "_timestamp";

/// The logical locations a session persists to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Working draft, overwritten by every autosave.
    Draft,
    /// Copy of record, written only by an explicit save.
    Committed,
    /// Epoch milliseconds of the last explicit save.
    Timestamp,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Draft, Slot::Committed, Slot::Timestamp];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Draft => "draft",
            Slot::Committed => "committed",
            Slot::Timestamp => "timestamp",
        }
    }
}

/// Key names for the three slots, all derived from one storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNamespace {
    draft: String,
    committed: String,
    timestamp: String,
}

impl StorageNamespace {
    pub fn new(storage_key: &str) -> Result<Self> {
        let base = storage_key.trim();
        if base.is_empty() {
            return Err(DraftError::InvalidConfig(
                "storage key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            draft: base.to_string(),
            committed: format!("{}{}", base, COMMITTED_SUFFIX),
            timestamp: format!("{}{}", base, TIMESTAMP_SUFFIX),
        })
    }

    pub fn base(&self) -> &str {
        &self.draft
    }

    pub fn key(&self, slot: Slot) -> &str {
        match slot {
            Slot::Draft => &self.draft,
            Slot::Committed => &self.committed,
            Slot::Timestamp => &self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys_share_base() {
        let ns = StorageNamespace::new("resume_draft").unwrap();
        assert_eq!(ns.key(Slot::Draft), "resume_draft");
        assert_eq!(ns.key(Slot::Committed), "resume_draft_saved");
        assert_eq!(ns.key(Slot::Timestamp), "resume_draft_timestamp");
        assert_eq!(ns.base(), "resume_draft");
    }

    #[test]
    fn test_key_is_trimmed() {
        let ns = StorageNamespace::new("  cv ").unwrap();
        assert_eq!(ns.key(Slot::Committed), "cv_saved");
    }

    #[test]
    fn test_empty_key_rejected() {
        match StorageNamespace::new("   ") {
            Err(DraftError::InvalidConfig(_)) => {}
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }
}
