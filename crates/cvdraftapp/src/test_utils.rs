//! Fixtures for building sessions and documents in tests.

use crate::clock::ManualClock;
use crate::config::SessionOptions;
use crate::model::Document;
use crate::session::EditorSession;
use crate::store::mem_backend::MemBackend;

pub fn doc_named(name: &str) -> Document {
    let mut doc = Document::new();
    doc.personal_info.name = name.to_string();
    doc
}

pub fn options(storage_key: &str, autosave_interval_ms: u64) -> SessionOptions {
    SessionOptions::new(storage_key, autosave_interval_ms).expect("valid test options")
}

/// A session on the default storage key with a manual clock starting at t=0.
pub fn session_with(
    backend: MemBackend,
    autosave_interval_ms: u64,
) -> EditorSession<MemBackend, ManualClock> {
    EditorSession::initialize(
        backend,
        ManualClock::at_epoch(),
        Document::new(),
        &options("resume_draft", autosave_interval_ms),
    )
    .expect("failed to start test session")
}
