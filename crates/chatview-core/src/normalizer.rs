//! Normalizer: turns a raw chat export into [`NormalizedMessage`] records.
//!
//! One pass over `messages`, in order. Each element resolves its author and
//! email to defaults, is dropped if it has no text, and has its
//! `created_date` run through the loose timestamp parser. Nothing in the pass
//! fails: the only error is a document that is not a chat export at all.

use crate::error::MalformedInputError;
use crate::timestamp::{self, ParseOptions};
use crate::types::{NormalizedMessage, RawChatExport, RawMessage, DELETED_USER};

/// Stateless normaliser carrying the timestamp parsing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    opts: ParseOptions,
}

impl Normalizer {
    pub fn new(opts: ParseOptions) -> Self {
        Self { opts }
    }

    /// Normalise an already-deserialised export.
    pub fn normalize(&self, raw: &RawChatExport) -> Vec<NormalizedMessage> {
        let elements = raw.messages.as_deref().unwrap_or_default();

        let out: Vec<NormalizedMessage> = elements
            .iter()
            .filter_map(|value| {
                // Non-object elements carry no text and are dropped like any
                // other textless message.
                if !value.is_object() {
                    return None;
                }
                let msg: RawMessage = serde_json::from_value(value.clone()).ok()?;
                self.normalize_message(msg)
            })
            .collect();

        tracing::debug!(
            input = elements.len(),
            kept = out.len(),
            dropped = elements.len() - out.len(),
            "normalized chat export"
        );
        out
    }

    /// Normalise a parsed JSON document, rejecting anything that is not an
    /// object with an optional `messages` array.
    pub fn normalize_value(
        &self,
        value: serde_json::Value,
    ) -> Result<Vec<NormalizedMessage>, MalformedInputError> {
        if !value.is_object() {
            return Err(MalformedInputError::new(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(&value)
            )));
        }
        let raw: RawChatExport = serde_json::from_value(value)
            .map_err(|e| MalformedInputError::new(format!("`messages` must be an array: {e}")))?;
        Ok(self.normalize(&raw))
    }

    /// Normalise JSON text.
    pub fn normalize_str(&self, src: &str) -> Result<Vec<NormalizedMessage>, MalformedInputError> {
        let value: serde_json::Value = serde_json::from_str(src)?;
        self.normalize_value(value)
    }

    fn normalize_message(&self, msg: RawMessage) -> Option<NormalizedMessage> {
        let text = msg.text.filter(|t| !t.is_empty())?;

        let (name, email) = match msg.creator {
            Some(creator) => (creator.name, creator.email),
            None => (None, None),
        };

        let timestamp = msg
            .created_date
            .as_deref()
            .and_then(|raw| timestamp::parse_loose(raw, self.opts))
            .map(|ts| ts.to_iso())
            .unwrap_or_default();

        Some(NormalizedMessage {
            name: name.unwrap_or_else(|| DELETED_USER.to_string()),
            email: email.unwrap_or_default(),
            text,
            timestamp,
        })
    }
}

/// Normalise with default options.
pub fn normalize(raw: &RawChatExport) -> Vec<NormalizedMessage> {
    Normalizer::default().normalize(raw)
}

/// Parse and normalise JSON text with default options.
pub fn normalize_str(src: &str) -> Result<Vec<NormalizedMessage>, MalformedInputError> {
    Normalizer::default().normalize_str(src)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
