//! Test builders: ergonomic constructors for messages and raw exports.
//!
//! These are for readability in assertions. They panic rather than return
//! errors.

use chatview_core::NormalizedMessage;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// MessageBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`NormalizedMessage`] expectations.
///
/// ```rust
/// let m = MessageBuilder::new("hi").name("Ann").email("a@x.com").at("2024-03-01T09:05:00").build();
/// ```
pub struct MessageBuilder {
    name: String,
    email: String,
    text: String,
    timestamp: String,
}

impl MessageBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: "Deleted User".to_string(),
            email: String::new(),
            text: text.into(),
            timestamp: String::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn at(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn build(self) -> NormalizedMessage {
        NormalizedMessage {
            name: self.name,
            email: self.email,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw export builder
// ---------------------------------------------------------------------------

/// Builds a raw export document one element at a time.
#[derive(Default)]
pub struct ExportBuilder {
    messages: Vec<Value>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A well-formed message.
    pub fn message(mut self, name: &str, email: &str, text: &str, created_date: &str) -> Self {
        self.messages.push(json!({
            "creator": {"name": name, "email": email},
            "text": text,
            "created_date": created_date,
        }));
        self
    }

    /// Any element, verbatim.
    pub fn raw(mut self, element: Value) -> Self {
        self.messages.push(element);
        self
    }

    pub fn build(self) -> Value {
        json!({ "messages": self.messages })
    }

    pub fn to_json(self) -> String {
        self.build().to_string()
    }
}
