//! # CLI Behavior
//!
//! This is **one possible UI client** for cvdraft, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ### Naked Execution (`cvdraft`)
//!
//! Running `cvdraft` with no arguments shows `cvdraft status`.
//!
//! ### Where Things Are Stored
//!
//! `--data <dir>` or `CVDRAFT_DATA` selects the data directory; otherwise the OS data
//! directory is used. `--key <name>` picks the storage key, so `cvdraft -k cv_ar` and
//! `cvdraft -k cv_en` edit two independent resumes.
//!
//! ## Module Structure
//!
//! - `commands`: Session setup, dispatch and the per-command handlers
//! - `render`: Output formatting (status lines, document JSON, notices)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::{run, AlreadyReported};
