//! Configuration types for chatview.
//!
//! [`Config::load`] reads `~/.config/chatview/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::export::ExportFormat;
use crate::timestamp::ParseOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[import]
day_first = false

[ui]
sidebar_width_pct = 25
show_email        = true
theme             = "default"

[export]
format = "text"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/chatview/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[import]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportConfig {
    /// Read `NN/NN/YYYY` dates day first.
    #[serde(default)]
    pub day_first: bool,
}

impl ImportConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { day_first: self.day_first }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width_pct")]
    pub sidebar_width_pct: u16,
    #[serde(default = "default_show_email")]
    pub show_email: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_sidebar_width_pct() -> u16 { 25 }
fn default_show_email() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width_pct: default_sidebar_width_pct(),
            show_email: default_show_email(),
            theme: default_theme(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Used when the output path has no recognised extension.
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/chatview/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path layered on the defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("chatview")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
