//! # Context Initialization
//!
//! Builds a ready-to-use [`EditorSession`] on the filesystem backend for a UI client.
//!
//! ## Data Directory
//!
//! Resolved in priority order:
//!
//! 1. `data_override` (the CLI's `--data` flag)
//! 2. `CVDRAFT_DATA` environment variable (primarily for testing)
//! 3. The OS data directory for `cvdraft`, via the `directories` crate
//!
//! The directory holds both the slot files and the optional `cvdraft.toml`.
//! It is created lazily by the first write.
//!
//! ## Storage Key Override
//!
//! `storage_key_override` replaces the configured `storage_key`, so one data
//! directory can hold several independent resumes (for example one per language).

use crate::clock::SystemClock;
use crate::config::DraftConfig;
use crate::error::{DraftError, Result};
use crate::model::Document;
use crate::session::EditorSession;
use crate::store::fs_backend::FsBackend;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DATA_DIR_ENV: &str = "CVDRAFT_DATA";
pub const CONFIG_FILE_NAME: &str = "cvdraft.toml";

pub struct DraftContext {
    pub session: EditorSession<FsBackend, SystemClock>,
    pub config: DraftConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "cvdraft", "cvdraft")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DraftError::InvalidConfig("could not determine data directory".to_string()))
}

/// Load `cvdraft.toml` from `data_dir`, falling back to defaults (with a warning)
/// if it cannot be parsed.
pub fn load_config(data_dir: &Path) -> DraftConfig {
    let loaded: std::result::Result<DraftConfig, _> = Clapfig::builder()
        .app_name("cvdraft")
        .file_name(CONFIG_FILE_NAME)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load();
    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!(
                dir = %data_dir.display(),
                error = %e,
                "ignoring unreadable {}, using defaults",
                CONFIG_FILE_NAME
            );
            DraftConfig::default()
        }
    }
}

pub fn initialize(
    data_override: Option<PathBuf>,
    storage_key_override: Option<String>,
) -> Result<DraftContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let mut config = load_config(&data_dir);
    if let Some(key) = storage_key_override {
        config.storage_key = key;
    }

    let options = config.session_options()?;
    let session = EditorSession::initialize(
        FsBackend::new(data_dir.clone()),
        SystemClock,
        Document::new(),
        &options,
    )?;

    Ok(DraftContext {
        session,
        config,
        data_dir,
    })
}
