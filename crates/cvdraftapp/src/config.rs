//! # Configuration
//!
//! Configuration is managed by [`clapfig`], which handles layered loading from TOML
//! files, environment variables, and programmatic overrides. See [`crate::init`] for
//! where the files are searched.
//!
//! Precedence, highest first:
//!
//! 1. **Environment variables**: `CVDRAFT__STORAGE_KEY`, `CVDRAFT__AUTOSAVE_INTERVAL_MS`
//! 2. **`cvdraft.toml`** in the data directory
//! 3. **Compiled defaults** via `#[config(default = ...)]`
//!
//! The CLI's `--key` flag is applied on top, after loading.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `resume_draft` | Base key for the draft, `_saved` and `_timestamp` slots |
//! | `autosave_interval_ms` | `3000` | Quiet period after the last edit before the draft is autosaved |
//!
//! A session only ever reads and writes under its own `storage_key`, so two resumes
//! can live in one data directory under different keys.

use crate::error::{DraftError, Result};
use chrono::Duration;
use confique::Config;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "resume_draft";
pub const DEFAULT_AUTOSAVE_INTERVAL_MS: u64 = 3000;

/// Longest accepted autosave delay (one day).
pub const MAX_AUTOSAVE_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;

/// Configuration for cvdraft, stored in `cvdraft.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DraftConfig {
    /// Base key for the storage slots.
    #[config(default = "resume_draft")]
    pub storage_key: String,

    /// Milliseconds without edits before the working draft is autosaved.
    #[config(default = 3000)]
    pub autosave_interval_ms: u64,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave_interval_ms: DEFAULT_AUTOSAVE_INTERVAL_MS,
        }
    }
}

impl DraftConfig {
    pub fn session_options(&self) -> Result<SessionOptions> {
        SessionOptions::new(&self.storage_key, self.autosave_interval_ms)
    }
}

/// What a session needs to know at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub storage_key: String,
    pub autosave_interval: Duration,
}

impl SessionOptions {
    pub fn new(storage_key: &str, autosave_interval_ms: u64) -> Result<Self> {
        if storage_key.trim().is_empty() {
            return Err(DraftError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        if autosave_interval_ms > MAX_AUTOSAVE_INTERVAL_MS {
            return Err(DraftError::InvalidConfig(format!(
                "autosave_interval_ms must be at most {} (got {})",
                MAX_AUTOSAVE_INTERVAL_MS, autosave_interval_ms
            )));
        }
        Ok(Self {
            storage_key: storage_key.trim().to_string(),
            autosave_interval: Duration::milliseconds(autosave_interval_ms as i64),
        })
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave_interval: Duration::milliseconds(DEFAULT_AUTOSAVE_INTERVAL_MS as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DraftConfig::default();
        assert_eq!(config.storage_key, "resume_draft");
        assert_eq!(config.autosave_interval_ms, 3000);
        assert_eq!(config.session_options().unwrap(), SessionOptions::default());
    }

    #[test]
    fn test_session_options_from_config() {
        let config = DraftConfig {
            storage_key: "cv_ar".to_string(),
            autosave_interval_ms: 30,
        };
        let options = config.session_options().unwrap();
        assert_eq!(options.storage_key, "cv_ar");
        assert_eq!(options.autosave_interval, Duration::milliseconds(30));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let config = DraftConfig {
            storage_key: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.session_options(),
            Err(DraftError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_interval_upper_bound() {
        assert!(SessionOptions::new("cv", MAX_AUTOSAVE_INTERVAL_MS).is_ok());
        assert!(SessionOptions::new("cv", MAX_AUTOSAVE_INTERVAL_MS + 1).is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config: DraftConfig =
            toml::from_str("storage_key = \"cv\"\nautosave_interval_ms = 500\n").unwrap();
        assert_eq!(config.storage_key, "cv");
        assert_eq!(config.autosave_interval_ms, 500);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("autosave_interval_ms = 500"));
    }
}
