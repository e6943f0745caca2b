use clap::{Parser, Subcommand, ValueEnum};
use cvdraftapp::model::{PersonalField, Section};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0\ndev: abc1234 2026-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "cvdraft",
    bin_name = "cvdraft",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Edit a resume draft from the terminal, with autosave", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $CVDRAFT_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Storage key to edit (overrides `storage_key` from cvdraft.toml)
    #[arg(short, long, global = true, value_name = "KEY", help_heading = "Options")]
    pub key: Option<String>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ShowSlot {
    /// The document the session is editing
    #[default]
    Working,
    /// The stored working draft
    Draft,
    /// The last explicitly saved copy
    Saved,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a document as JSON
    Show {
        /// Which copy to print
        #[arg(long, value_enum, default_value_t = ShowSlot::Working)]
        slot: ShowSlot,
    },

    /// Show save state and timestamps
    #[command(alias = "st")]
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a personal info field (name, email, phone, location, summary, ...)
    Set { field: PersonalField, value: String },

    /// Append an entry (a JSON object) to a section
    Add { section: Section, entry: String },

    /// Remove an entry from a section by its 1-based position
    #[command(alias = "rm")]
    Remove { section: Section, index: usize },

    /// Switch the resume template
    Template { id: String },

    /// Save the document as the committed copy
    Save {
        /// Do not print a confirmation
        #[arg(short, long)]
        quiet: bool,
    },

    /// Drop unsaved changes and return to the saved copy
    Discard,

    /// Delete the draft, the saved copy and the save timestamp
    Clear,

    /// Show the resolved configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        let cli = parse(&["cvdraft"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_set_parses_field_aliases() {
        let cli = parse(&["cvdraft", "set", "birth_date", "1990-01-01"]);
        match cli.command {
            Some(Commands::Set { field, value }) => {
                assert_eq!(field, PersonalField::BirthDate);
                assert_eq!(value, "1990-01-01");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_set_rejects_unknown_field() {
        assert!(Cli::try_parse_from(["cvdraft", "set", "shoe-size", "44"]).is_err());
    }

    #[test]
    fn test_remove_parses_section_and_index() {
        let cli = parse(&["cvdraft", "rm", "exp", "2"]);
        match cli.command {
            Some(Commands::Remove { section, index }) => {
                assert_eq!(section, Section::Experience);
                assert_eq!(index, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_slot_defaults_to_working() {
        match parse(&["cvdraft", "show"]).command {
            Some(Commands::Show { slot }) => assert_eq!(slot, ShowSlot::Working),
            other => panic!("unexpected command: {:?}", other),
        }
        match parse(&["cvdraft", "show", "--slot", "saved"]).command {
            Some(Commands::Show { slot }) => assert_eq!(slot, ShowSlot::Saved),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["cvdraft", "status", "--key", "cv_ar", "--data", "/tmp/cv", "-v"]);
        assert_eq!(cli.key.as_deref(), Some("cv_ar"));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/cv")));
        assert!(cli.verbose);
    }
}
