//! Error taxonomy for chatview-core.
//!
//! Only whole-document failures surface as errors. Per-field defects are
//! absorbed by the normalizer's defaulting and filtering rules.

use std::path::PathBuf;
use thiserror::Error;

/// The import source did not supply a usable chat export at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed chat export: {reason}")]
pub struct MalformedInputError {
    pub reason: String,
}

impl MalformedInputError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl From<serde_json::Error> for MalformedInputError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Failure while loading a chat export into the session store.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

/// Failure while writing an exported document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}
