//! # cvdraft CLI
//!
//! A terminal client for the cvdraft draft engine. The binary is thin: the CLI lives
//! in `src/cli/`, and this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/cvdraftapp/`: UI-agnostic library (document, storage slots, autosave,
//!   saves, dirty tracking)
//! - `crates/cvdraft/`: this CLI, depends on `cvdraftapp`
//!
//! ## One Session per Invocation
//!
//! Every run opens an [`EditorSession`](cvdraftapp::session::EditorSession) on the
//! filesystem backend, applies one command and ends the session. Ending the session
//! flushes a pending autosave, so an edit made with `cvdraft set` lands in the draft
//! slot and the next run picks it up as unsaved work. Only `cvdraft save` writes the
//! committed copy.
//!
//! ```text
//! $ cvdraft set name "Sara"     # draft written, committed copy untouched
//! $ cvdraft status              # "unsaved changes"
//! $ cvdraft save                # committed + timestamp slots written
//! $ cvdraft status              # "all changes saved"
//! ```
//!
//! ## Testing Approach
//!
//! - **Library (`crates/cvdraftapp/`)**: unit tests per module against `MemBackend`
//!   and `ManualClock`, plus filesystem integration tests.
//! - **CLI (`src/cli/`)**: argument parsing and rendering are unit tested; whole
//!   workflows run through the real binary in `tests/cli_e2e.rs`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        if e.downcast_ref::<cli::AlreadyReported>().is_none() {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
