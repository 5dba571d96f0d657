//! Thread layout policy: which side each bubble sits on and where the date
//! separators go.
//!
//! The author of the first message owns the left side; everyone else is
//! drawn on the right. A separator is emitted whenever the calendar date
//! changes between consecutive messages, so undated messages collapse under
//! a single "Unknown Date" separator per run.

use chatview_core::format::format_calendar_date;
use chatview_core::NormalizedMessage;

/// Horizontal placement of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One row group in the rendered thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadItem {
    DateSeparator(String),
    Message { index: usize, side: Side },
}

/// Side assignment, parameterised by the resolved first-author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPolicy {
    left_author: String,
}

impl ThreadPolicy {
    pub fn new(left_author: impl Into<String>) -> Self {
        Self { left_author: left_author.into() }
    }

    /// Policy for a conversation, or `None` when it has no messages.
    pub fn for_messages(messages: &[NormalizedMessage]) -> Option<Self> {
        messages.first().map(|m| Self::new(m.name.clone()))
    }

    pub fn side(&self, message: &NormalizedMessage) -> Side {
        if message.name == self.left_author {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Lay out `messages` as separators and bubbles, in order.
pub fn thread_items(messages: &[NormalizedMessage]) -> Vec<ThreadItem> {
    let Some(policy) = ThreadPolicy::for_messages(messages) else {
        return Vec::new();
    };

    let mut items = Vec::with_capacity(messages.len() + 4);
    let mut last_date: Option<String> = None;

    for (index, message) in messages.iter().enumerate() {
        let date = format_calendar_date(&message.timestamp);
        if last_date.as_deref() != Some(date.as_str()) {
            items.push(ThreadItem::DateSeparator(date.clone()));
            last_date = Some(date);
        }
        items.push(ThreadItem::Message { index, side: policy.side(message) });
    }
    items
}
