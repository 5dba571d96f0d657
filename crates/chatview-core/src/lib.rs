//! chatview-core: chat export normalisation and the collaborators built on it.
//!
//! This crate exposes the normalisation pipeline and the thin layers that
//! consume its output, plus the shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! ImportSource ──► Normalizer ──► SessionStore ──► UI
//!                                      │
//!                                      └──► Export
//! ```
//!
//! Everything is synchronous. The normalizer is a pure function of its input;
//! the session store is owned by the caller and passed down explicitly.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod normalizer;
pub mod session;
pub mod timestamp;
pub mod types;

pub use error::{ExportError, ImportError, MalformedInputError};
pub use normalizer::{normalize, normalize_str, Normalizer};
pub use session::SessionStore;
pub use types::{NormalizedMessage, RawChatExport, RawCreator, RawMessage};
