// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use std::path::PathBuf;

use crate::{
    app::AppState,
    theme::{Theme, THEME_NAMES},
    widgets::status_line::Status,
};
use chatview_core::{
    export::{export_to_path, ExportFormat},
    import::FileSource,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Display help
    Help,
    // Import a chat export from disk
    Open(String),
    // Write the shown session to a file
    Export(String),
    Theme(String),
    // Toggle the email row in bubbles
    Email,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        let required = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "email" => Ok(Command::Email),
            "o" | "open" => required("open <path>").map(Command::Open),
            "w" | "export" => required("export <path>").map(Command::Export),
            "theme" => required("theme <default|gruvbox>").map(Command::Theme),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Email => {
            s.thread.show_email = !s.thread.show_email;
        }
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => {
                s.theme = theme;
                s.status = Some(Status::Info(format!("theme: {name}")));
            }
            None => {
                s.status = Some(Status::Error(format!(
                    "unknown theme {name:?} (available: {})",
                    THEME_NAMES.join(", ")
                )));
            }
        },
        Command::Open(path) => {
            let source = FileSource::new(expand_home(&path));
            let status = match s.store.import(&source, &s.normalizer) {
                Ok(label) => {
                    s.show_session(s.store.len() - 1);
                    let count = s.thread.messages.len();
                    Status::Info(format!("imported {label} ({count} messages)"))
                }
                Err(e) => Status::Error(e.to_string()),
            };
            s.status = Some(status);
        }
        Command::Export(path) => {
            let status = export_active(s, &path);
            s.status = Some(status);
        }
    }
}

fn export_active(s: &AppState, path: &str) -> Status {
    let Some(label) = s.active_label() else {
        return Status::Info("no chat selected".to_string());
    };
    if s.thread.messages.is_empty() {
        return Status::Info("nothing to export".to_string());
    }

    let path = expand_home(path);
    let format = ExportFormat::from_path(&path).unwrap_or(s.config.export.format);
    match export_to_path(format, label, &s.thread.messages, &path) {
        Ok(()) => Status::Info(format!("exported {label} to {} ({format})", path.display())),
        Err(e) => Status::Error(format!("export failed: {e}")),
    }
}

/// Expand a leading `~/` to `$HOME`.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
