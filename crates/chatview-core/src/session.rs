//! Session store: the imported conversations, keyed by display label.
//!
//! The store is owned by the presentation layer and passed in explicitly.
//! Labels are unique: a second import of `chat.json` becomes `chat.json (2)`.
//! Sessions keep their insertion order and are never modified once added.

use crate::error::ImportError;
use crate::import::ImportSource;
use crate::normalizer::Normalizer;
use crate::types::NormalizedMessage;
use std::sync::Arc;

/// One imported conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub label: String,
    pub messages: Arc<[NormalizedMessage]>,
}

/// Insertion-ordered collection of sessions with unique labels.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session under `base_label`, suffixing ` (2)`, ` (3)`, … on
    /// collision. Returns the label actually used.
    pub fn insert(&mut self, base_label: &str, messages: Vec<NormalizedMessage>) -> String {
        let label = self.unique_label(base_label);
        tracing::debug!(label = %label, messages = messages.len(), "session added");
        self.sessions.push(Session { label: label.clone(), messages: messages.into() });
        label
    }

    /// Load, normalise, and insert a chat export. On error the store is left
    /// exactly as it was.
    pub fn import(
        &mut self,
        source: &dyn ImportSource,
        normalizer: &Normalizer,
    ) -> Result<String, ImportError> {
        let base = source.label();
        let value = source.load().inspect_err(|e| {
            tracing::warn!(source = %base, error = %e, "import failed");
        })?;
        let messages = normalizer.normalize_value(value).map_err(|e| {
            tracing::warn!(source = %base, error = %e, "import rejected");
            ImportError::Malformed(e)
        })?;
        Ok(self.insert(&base, messages))
    }

    pub fn get(&self, label: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.label == label)
    }

    pub fn get_index(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sessions.iter().map(|s| s.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn unique_label(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base} ({n})"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}
