//! # cvdraft Architecture
//!
//! cvdraft is the **draft persistence engine** behind a bilingual (Arabic/English)
//! resume builder. The forms, cards and reference data live in the UI; this crate
//! owns the one piece with real state: the document being edited, and keeping it
//! safely persisted while the user types.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Client (the cvdraft CLI, or any other front end)        │
//! │  - Mutates the document, polls, saves, renders status       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Owns the Document and the session flags                  │
//! │  - Autosave debounce (autosave.rs), saves (save.rs),        │
//! │    dirty tracking (dirty.rs), startup (bootstrap.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DraftStore: three slots under one storage key            │
//! │  - KvBackend trait: FsBackend (production), MemBackend      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Nothing here writes to stdout/stderr, exits the process, or sleeps. Time comes
//! from a [`clock::Clock`], storage from a [`store::KvBackend`], and user-facing
//! messages go to a [`notify::Notifier`]. Diagnostics go through `tracing`; the
//! client decides whether and where to print them.
//!
//! ## Module Overview
//!
//! - [`session`]: The editor session facade, entry point for all operations
//! - [`store`]: Slot model, key-value abstraction and implementations
//! - [`model`]: The resume `Document` and partial updates
//! - [`autosave`]: Trailing-edge debounce state machine
//! - [`save`]: Explicit save state machine
//! - [`dirty`]: Unsaved-change detection against the committed copy
//! - [`bootstrap`]: Choosing the startup document
//! - [`config`]: Configuration and session options
//! - [`init`]: Filesystem-backed session setup for clients
//! - [`clock`]: Time sources
//! - [`notify`]: Save notices
//! - [`error`]: Error types

pub mod autosave;
pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod dirty;
pub mod error;
pub mod init;
pub mod model;
pub mod notify;
pub mod save;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
