//! chatview: browse and export JSON chat exports from the terminal.
//!
//! The binary is a thin shell: it parses the command line, loads the config,
//! imports the given files into a [`SessionStore`], and then either writes a
//! single export (`--export`) or hands the store to the TUI.
//!
//! # Architecture
//!
//! ```text
//! FileSource ──► Normalizer ──► SessionStore ──► TUI
//!                                    │
//!                                    └──► export_to_path
//! ```

use std::path::PathBuf;

use anyhow::Context;
use chatview_core::{
    config::Config,
    export::{export_to_path, ExportFormat},
    import::FileSource,
    Normalizer, SessionStore,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chatview", version, about = "Terminal viewer and exporter for JSON chat exports")]
pub struct Cli {
    /// Chat export files to import, in order.
    pub files: Vec<PathBuf>,

    /// Export a session to PATH and exit without starting the UI.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Session to export (defaults to the first imported file).
    #[arg(long, value_name = "LABEL", requires = "export")]
    pub session: Option<String>,

    /// Export format: text, markdown or jsonl. Defaults to the file
    /// extension, then to the config file.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ExportFormat>,

    /// Heading for the exported document (defaults to the session label).
    #[arg(long)]
    pub title: Option<String>,

    /// Read NN/NN/YYYY dates day first.
    #[arg(long)]
    pub day_first: bool,

    /// Write debug logs to chatview-debug.log in the temp dir.
    #[arg(long)]
    pub debug: bool,

    /// Use this config file instead of ~/.config/chatview/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run chatview with parsed arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config unreadable, using defaults");
            Config::defaults()
        }),
    };

    let mut opts = config.import.parse_options();
    opts.day_first |= cli.day_first;
    let normalizer = Normalizer::new(opts);

    let store = import_all(&cli.files, &normalizer);

    match &cli.export {
        Some(path) => export_headless(&cli, &config, &store, path),
        None => chatview_tui::run(store, config, normalizer),
    }
}

/// Import every file, reporting failures on stderr without aborting.
pub fn import_all(files: &[PathBuf], normalizer: &Normalizer) -> SessionStore {
    let mut store = SessionStore::new();
    for path in files {
        if let Err(e) = store.import(&FileSource::new(path), normalizer) {
            eprintln!("chatview: skipping {}: {e}", path.display());
        }
    }
    tracing::debug!(requested = files.len(), imported = store.len(), "startup import done");
    store
}

fn export_headless(
    cli: &Cli,
    config: &Config,
    store: &SessionStore,
    path: &std::path::Path,
) -> anyhow::Result<()> {
    let session = match &cli.session {
        Some(label) => store.get(label).with_context(|| {
            let known: Vec<&str> = store.labels().collect();
            format!("no session named {label:?} (imported: {})", known.join(", "))
        })?,
        None => store.iter().next().context("nothing to export: no chat was imported")?,
    };

    let format = cli
        .format
        .or_else(|| ExportFormat::from_path(path))
        .unwrap_or(config.export.format);
    let title = cli.title.as_deref().unwrap_or(session.label.as_str());

    export_to_path(format, title, &session.messages, path)
        .with_context(|| format!("cannot export to {}", path.display()))?;
    tracing::info!(session = %session.label, path = %path.display(), %format, "headless export");
    Ok(())
}
