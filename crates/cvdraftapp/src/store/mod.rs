//! # Storage Layer
//!
//! This module defines how drafts reach durable storage. The [`backend::KvBackend`]
//! trait abstracts the host's key-value medium; [`draft_store::DraftStore`] layers
//! the slot model and error policy on top of it.
//!
//! ## The Three Slots
//!
//! One configured storage key `K` owns three slots:
//!
//! | Slot | Key | Value | Writer |
//! |------|-----|-------|--------|
//! | draft | `K` | Document JSON | autosave (and explicit save) |
//! | committed | `K_saved` | Document JSON | explicit save only |
//! | timestamp | `K_timestamp` | epoch ms, decimal | explicit save only |
//!
//! The **draft** is continuously overwritten and may be newer than the committed
//! copy. The **committed** copy is the save of record and the baseline for
//! unsaved-change detection.
//!
//! ## Error Policy
//!
//! - **Draft writes are best effort**: a failed autosave is logged and swallowed.
//!   A background write must never interrupt editing.
//! - **Committed writes raise**: the user asked for the save and must learn it failed.
//!   A half-finished commit (document written, timestamp not) is rolled back first.
//! - **Keys are checked up front**: a session does not start on a storage key the
//!   backend cannot store ([`backend::KvBackend::validate_key`]).
//! - **Reads degrade to absent**: an unreadable or corrupt slot reads as `None`
//!   (logged), so startup falls through to the next source instead of failing.
//!
//! ## Lifecycle
//!
//! Slots are created by the first autosave or save, overwritten by later ones, and
//! removed only by an explicit clear. Nothing expires on its own.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: One file per key in a data directory, atomic writes.
//! - [`mem_backend::MemBackend`]: In-memory, with failure simulation, for tests.

pub mod backend;
pub mod draft_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod namespace;

pub use backend::KvBackend;
pub use draft_store::DraftStore;
pub use namespace::{Slot, StorageNamespace};
