//! Domain-specific assertion macros for chatview harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! record broke which rule.

/// Assert that every message has non-empty text and non-empty name, i.e.
/// the normaliser's output invariants hold.
///
/// ```rust
/// assert_normalized!(messages);
/// ```
#[macro_export]
macro_rules! assert_normalized {
    ($messages:expr) => {{
        let messages: &[chatview_core::NormalizedMessage] = &$messages;
        for (i, m) in messages.iter().enumerate() {
            if m.text.is_empty() {
                panic!("assert_normalized! failed: record {i} has empty text: {m:?}");
            }
            if m.name.is_empty() {
                panic!("assert_normalized! failed: record {i} has empty name: {m:?}");
            }
            if !m.timestamp.is_empty()
                && chatview_core::timestamp::parse_canonical(&m.timestamp).is_none()
            {
                panic!(
                    "assert_normalized! failed: record {i} timestamp {:?} is not canonical",
                    m.timestamp
                );
            }
        }
    }};
}

/// Assert the texts of a message slice, in order.
///
/// ```rust
/// assert_texts!(messages, ["hi", "hello"]);
/// ```
#[macro_export]
macro_rules! assert_texts {
    ($messages:expr, [$($text:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $messages.iter().map(|m| m.text.as_str()).collect();
        let expected: Vec<&str> = vec![$($text),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_texts! failed");
    }};
}

/// Assert the session labels of a store, in insertion order.
#[macro_export]
macro_rules! assert_labels {
    ($store:expr, [$($label:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $store.labels().collect();
        let expected: Vec<&str> = vec![$($label),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_labels! failed");
    }};
}
