//! Terminal formatting for command output.
//!
//! Everything here returns a `String`; the handlers decide where it is printed.
//! Styling uses `console`, which drops the escape codes when the stream is not a
//! terminal.

use chrono::{DateTime, Utc};
use console::style;
use cvdraftapp::config::DraftConfig;
use cvdraftapp::model::Document;
use cvdraftapp::notify::{Notice, NoticeLevel};
use cvdraftapp::session::SessionStatus;
use std::path::Path;

pub fn document_json(doc: &Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

pub fn status_json(status: &SessionStatus) -> serde_json::Result<String> {
    serde_json::to_string_pretty(status)
}

/// Human-readable status block, with times relative to `now`.
pub fn status(status: &SessionStatus, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{}  {}\n",
        style(&status.storage_key).bold(),
        style(format!("(opened from {})", status.hydrated_from)).dim()
    );

    let state = if status.is_saving {
        style("● saving…".to_string()).cyan()
    } else if status.has_unsaved_changes {
        style("● unsaved changes".to_string()).yellow()
    } else {
        style("✓ all changes saved".to_string()).green()
    };
    out.push_str(&format!("{}\n", state));

    out.push_str(&format!(
        "{:<15}{}\n",
        "Last saved:",
        format_time(status.last_saved_at, now)
    ));
    out.push_str(&format!(
        "{:<15}{}\n",
        "Last autosave:",
        format_time(status.last_autosave_at, now)
    ));
    if let Some(due) = status.autosave_due_at {
        out.push_str(&format!("{:<15}{}\n", "Autosave due:", format_absolute(due)));
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("{} {}", style("✓").green(), notice.content),
        NoticeLevel::Error => format!("{} {}", style("✗").red(), notice.content),
    }
}

/// Confirmation printed after an edit command.
pub fn edited(action: &str, target: &str) -> String {
    format!("{} {}", style(action).green(), target)
}

/// The resolved configuration as TOML, headed by where it was read from.
pub fn config(config: &DraftConfig, data_dir: &Path) -> Result<String, toml::ser::Error> {
    let body = toml::to_string_pretty(config)?;
    Ok(format!(
        "{}\n{}",
        style(format!("# data directory: {}", data_dir.display())).dim(),
        body
    ))
}

fn format_time(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match at {
        Some(at) => {
            // A timestamp ahead of the local clock reads "now".
            let elapsed = now.signed_duration_since(at).to_std().unwrap_or_default();
            format!(
                "{} {}",
                timeago::Formatter::new().convert(elapsed),
                style(format!("({})", format_absolute(at))).dim()
            )
        }
        None => style("never".to_string()).dim().to_string(),
    }
}

fn format_absolute(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
