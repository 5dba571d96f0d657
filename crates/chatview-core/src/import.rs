//! Import sources: where raw chat exports come from.
//!
//! An [`ImportSource`] hands the normalizer a parsed JSON document or signals
//! that it could not. The display label it suggests becomes the session key
//! in [`SessionStore`](crate::SessionStore).

use crate::error::{ImportError, MalformedInputError};
use std::path::PathBuf;

/// A supplier of raw chat export documents.
pub trait ImportSource {
    /// Suggested session label before collision handling.
    fn label(&self) -> String;

    /// Read and parse the document.
    fn load(&self) -> Result<serde_json::Value, ImportError>;
}

/// A chat export on the local filesystem. The label is the file's base name.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImportSource for FileSource {
    fn label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load(&self) -> Result<serde_json::Value, ImportError> {
        let src = std::fs::read_to_string(&self.path).map_err(|source| ImportError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = src.len(), "read chat export");
        parse_document(&src)
    }
}

/// An in-memory chat export with a caller-chosen label.
#[derive(Debug, Clone)]
pub struct StrSource {
    label: String,
    src: String,
}

impl StrSource {
    pub fn new(label: impl Into<String>, src: impl Into<String>) -> Self {
        Self { label: label.into(), src: src.into() }
    }
}

impl ImportSource for StrSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> Result<serde_json::Value, ImportError> {
        parse_document(&self.src)
    }
}

fn parse_document(src: &str) -> Result<serde_json::Value, ImportError> {
    // Exports saved from Windows tools often start with a BOM.
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    serde_json::from_str(src).map_err(|e| ImportError::Malformed(MalformedInputError::from(e)))
}
