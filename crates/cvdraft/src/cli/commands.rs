//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Decides the process exit code
//!
//! ## Flow of One Invocation
//!
//! 1. Parse arguments (`setup.rs`)
//! 2. Install logging: `RUST_LOG` if set, else `warn` (`debug` with `-v`)
//! 3. Open the session via [`cvdraftapp::init::initialize`]
//! 4. Dispatch the command against the session
//! 5. End the session with [`EditorSession::flush`], even if the command failed,
//!    so an edit applied before the failure is not lost

use super::render;
use super::setup::{Cli, Commands, ShowSlot};
use anyhow::{bail, Context, Result};
use clap::Parser;
use cvdraftapp::clock::Clock;
use cvdraftapp::config::DraftConfig;
use cvdraftapp::init::{initialize, DraftContext};
use cvdraftapp::model::{DocumentPatch, Section};
use cvdraftapp::notify::{Notice, NoticeLevel, Notifier};
use cvdraftapp::session::EditorSession;
use cvdraftapp::store::KvBackend;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Marks a failure whose message the user has already seen, so `main` only sets
/// the exit code.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error already reported")
    }
}

impl std::error::Error for AlreadyReported {}

/// Prints save notices: successes to stdout, failures to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", render::notice(notice)),
            NoticeLevel::Error => eprintln!("{}", render::notice(notice)),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let DraftContext {
        session,
        config,
        data_dir,
    } = initialize(cli.data, cli.key)?;
    debug!(data_dir = %data_dir.display(), "session opened");

    let mut session = session.with_notifier(ConsoleNotifier);
    let command = cli.command.unwrap_or(Commands::Status { json: false });
    let result = dispatch(&mut session, command, &config, &data_dir);

    if session.flush() {
        debug!("pending autosave flushed at exit");
    }
    result
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Already installed only happens when run() is re-entered in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch<B: KvBackend, C: Clock>(
    session: &mut EditorSession<B, C>,
    command: Commands,
    config: &DraftConfig,
    data_dir: &Path,
) -> Result<()> {
    match command {
        Commands::Show { slot } => handle_show(session, slot),
        Commands::Status { json } => {
            let status = session.status();
            if json {
                println!("{}", render::status_json(&status)?);
            } else {
                print!("{}", render::status(&status, chrono::Utc::now()));
            }
            Ok(())
        }
        Commands::Set { field, value } => {
            session.mutate(DocumentPatch::new().field(field, value));
            println!("{}", render::edited("Updated", field.as_str()));
            Ok(())
        }
        Commands::Add { section, entry } => handle_add(session, section, &entry),
        Commands::Remove { section, index } => handle_remove(session, section, index),
        Commands::Template { id } => {
            let id = id.trim().to_string();
            if id.is_empty() {
                bail!("template id cannot be empty");
            }
            session.mutate(DocumentPatch::new().template(id.clone()));
            println!("{}", render::edited("Template", &id));
            Ok(())
        }
        Commands::Save { quiet } => match session.save(!quiet) {
            Ok(_) => Ok(()),
            Err(e) if quiet => Err(e.into()),
            // The failure notice already told the user.
            Err(_) => Err(AlreadyReported.into()),
        },
        Commands::Discard => {
            if !session.revert_to_saved() {
                bail!("no saved copy to return to");
            }
            println!("{}", render::edited("Reverted", "to the saved copy"));
            Ok(())
        }
        Commands::Clear => {
            session.clear_storage()?;
            println!(
                "{}",
                render::edited("Cleared", session.status().storage_key.as_str())
            );
            Ok(())
        }
        Commands::Config => {
            print!("{}", render::config(config, data_dir)?);
            Ok(())
        }
    }
}

fn handle_show<B: KvBackend, C: Clock>(
    session: &EditorSession<B, C>,
    slot: ShowSlot,
) -> Result<()> {
    let doc = match slot {
        ShowSlot::Working => Some(session.document().clone()),
        ShowSlot::Draft => session.load_draft(),
        ShowSlot::Saved => session.load_saved(),
    };
    match doc {
        Some(doc) => {
            println!("{}", render::document_json(&doc)?);
            Ok(())
        }
        None => bail!("no {} copy is stored", slot_name(slot)),
    }
}

fn slot_name(slot: ShowSlot) -> &'static str {
    match slot {
        ShowSlot::Working => "working",
        ShowSlot::Draft => "draft",
        ShowSlot::Saved => "saved",
    }
}

fn handle_add<B: KvBackend, C: Clock>(
    session: &mut EditorSession<B, C>,
    section: Section,
    entry: &str,
) -> Result<()> {
    let value: Value = serde_json::from_str(entry)
        .with_context(|| format!("{} entry is not valid JSON", section))?;
    if !value.is_object() {
        bail!("{} entry must be a JSON object", section);
    }

    session.edit(|doc| doc.section_mut(section).push(value));
    let position = session.document().section(section).len();
    println!(
        "{}",
        render::edited("Added", &format!("{} #{}", section, position))
    );
    Ok(())
}

fn handle_remove<B: KvBackend, C: Clock>(
    session: &mut EditorSession<B, C>,
    section: Section,
    index: usize,
) -> Result<()> {
    let len = session.document().section(section).len();
    if index == 0 || index > len {
        bail!("{} has {} entries, no entry #{}", section, len, index);
    }

    session.edit(|doc| {
        doc.section_mut(section).remove(index - 1);
    });
    println!(
        "{}",
        render::edited("Removed", &format!("{} #{}", section, index))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvdraftapp::model::PersonalField;
    use cvdraftapp::store::mem_backend::MemBackend;
    use cvdraftapp::test_utils::session_with;
    use std::path::PathBuf;

    fn run_cmd<B: KvBackend, C: Clock>(
        session: &mut EditorSession<B, C>,
        command: Commands,
    ) -> Result<()> {
        dispatch(
            session,
            command,
            &DraftConfig::default(),
            &PathBuf::from("/tmp/cvdraft-test"),
        )
    }

    #[test]
    fn test_set_arms_autosave_without_writing() {
        let mut session = session_with(MemBackend::new(), 3000);
        run_cmd(
            &mut session,
            Commands::Set {
                field: PersonalField::Name,
                value: "Sara".to_string(),
            },
        )
        .unwrap();

        assert_eq!(session.document().personal_info.name, "Sara");
        assert!(session.autosave_pending());
        assert_eq!(session.load_draft(), None);

        assert!(session.flush());
        assert_eq!(
            session.load_draft().map(|d| d.personal_info.name),
            Some("Sara".to_string())
        );
    }

    #[test]
    fn test_add_and_remove_entries() {
        let mut session = session_with(MemBackend::new(), 3000);
        run_cmd(
            &mut session,
            Commands::Add {
                section: Section::Skills,
                entry: r#"{"name":"Rust"}"#.to_string(),
            },
        )
        .unwrap();
        run_cmd(
            &mut session,
            Commands::Add {
                section: Section::Skills,
                entry: r#"{"name":"Arabic"}"#.to_string(),
            },
        )
        .unwrap();
        assert_eq!(session.document().skills.len(), 2);

        run_cmd(
            &mut session,
            Commands::Remove {
                section: Section::Skills,
                index: 1,
            },
        )
        .unwrap();
        assert_eq!(session.document().skills, vec![serde_json::json!({"name": "Arabic"})]);
    }

    #[test]
    fn test_add_rejects_non_objects() {
        let mut session = session_with(MemBackend::new(), 3000);
        for entry in ["not json", "[1,2]", "\"text\""] {
            let result = run_cmd(
                &mut session,
                Commands::Add {
                    section: Section::Courses,
                    entry: entry.to_string(),
                },
            );
            assert!(result.is_err(), "accepted {}", entry);
        }
        assert!(session.document().courses.is_empty());
        assert!(!session.autosave_pending());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut session = session_with(MemBackend::new(), 3000);
        let err = run_cmd(
            &mut session,
            Commands::Remove {
                section: Section::Experience,
                index: 1,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("experience has 0 entries"));
        assert!(!session.autosave_pending());
    }

    #[test]
    fn test_save_failure_is_already_reported() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let mut session = session_with(backend, 3000);

        let err = run_cmd(&mut session, Commands::Save { quiet: false }).unwrap_err();
        assert!(err.downcast_ref::<AlreadyReported>().is_some());

        let err = run_cmd(&mut session, Commands::Save { quiet: true }).unwrap_err();
        assert!(err.downcast_ref::<AlreadyReported>().is_none());
    }

    #[test]
    fn test_discard_without_saved_copy_fails() {
        let mut session = session_with(MemBackend::new(), 3000);
        assert!(run_cmd(&mut session, Commands::Discard).is_err());
    }

    #[test]
    fn test_show_missing_slot_fails() {
        let mut session = session_with(MemBackend::new(), 3000);
        assert!(run_cmd(&mut session, Commands::Show { slot: ShowSlot::Working }).is_ok());
        assert!(run_cmd(&mut session, Commands::Show { slot: ShowSlot::Saved }).is_err());
    }

    #[test]
    fn test_clear_after_save() {
        let mut session = session_with(MemBackend::new(), 3000);
        run_cmd(&mut session, Commands::Template { id: "modern".to_string() }).unwrap();
        run_cmd(&mut session, Commands::Save { quiet: true }).unwrap();
        assert!(session.load_saved().is_some());

        run_cmd(&mut session, Commands::Clear).unwrap();
        assert_eq!(session.load_saved(), None);
        assert_eq!(session.last_saved_at(), None);
    }
}
