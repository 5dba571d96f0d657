//! Core types for chatview-core.
//!
//! This module defines the raw shape of a chat export as it arrives on disk
//! ([`RawChatExport`], [`RawMessage`], [`RawCreator`]) and the normalised
//! [`NormalizedMessage`] record every other layer consumes.
//!
//! The raw types are deliberately forgiving: every field is optional, and a
//! value of the wrong JSON type deserialises as `None` instead of failing the
//! whole document.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Author name used when a message has no creator or the creator has no name.
pub const DELETED_USER: &str = "Deleted User";

/// A normalised chat message produced by the normalizer.
///
/// All four fields are always present. `timestamp` is either a canonical
/// ISO-8601 string or empty when the source date was missing or unparsable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub name: String,
    pub email: String,
    pub text: String,
    pub timestamp: String,
}

/// Top-level chat export document.
///
/// Only `messages` is interpreted. A missing or `null` `messages` key is an
/// empty conversation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChatExport {
    #[serde(default)]
    pub messages: Option<Vec<serde_json::Value>>,
}

/// One element of `messages`, before defaults and filtering are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub creator: Option<RawCreator>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_date: Option<String>,
}

/// Author block of a raw message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCreator {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
}

/// Deserialize any JSON value, keeping it only if it converts to `T`.
///
/// `null`, wrong types, and shapes that do not fit `T` all become `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
