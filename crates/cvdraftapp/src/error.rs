use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Corrupt value in slot '{key}': {reason}")]
    StorageParse { key: String, reason: String },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DraftError>;
