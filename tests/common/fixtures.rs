//! Static chat export corpora used across harnesses.
//!
//! Each corpus is a complete export document. `CORPUS_*` slices group them
//! for rstest parameterisation.

use std::path::{Path, PathBuf};

/// Scenario A: a single well-formed message.
pub const CHAT_SINGLE: &str = r#"{"messages":[{"creator":{"name":"Ann","email":"a@x.com"},"text":"hi","created_date":"2024-03-01T09:05:00"}]}"#;

/// Scenario B: one empty message and one with an empty creator.
pub const CHAT_DELETED_USER: &str = r#"{"messages":[{"text":""}, {"creator":{}, "text":"hello"}]}"#;

/// Scenario C: no `messages` key at all.
pub const CHAT_NO_MESSAGES: &str = "{}";

/// Scenario D: not JSON.
pub const NOT_JSON: &str = "not json";

/// A two-day conversation between two people with assorted date styles.
pub const CHAT_TWO_DAYS: &str = r#"{
  "messages": [
    {"creator": {"name": "Ann", "email": "ann@example.com"}, "text": "are we still on for friday?", "created_date": "Thursday, March 7, 2024 at 6:15:02 PM UTC"},
    {"creator": {"name": "Bob", "email": "bob@example.com"}, "text": "yes, 7pm", "created_date": "2024-03-07T18:20:45Z"},
    {"creator": {"name": "Ann", "email": "ann@example.com"}, "text": "", "created_date": "2024-03-07T18:21:00Z"},
    {"creator": {"name": "Bob", "email": "bob@example.com"}, "text": "running late", "created_date": "March 8th, 2024 7:04 PM"},
    {"creator": {"name": "Ann", "email": "ann@example.com"}, "text": "no worries", "created_date": "3/8/2024 19:06"}
  ]
}"#;

/// Every field defect the normaliser tolerates, in one document.
pub const CHAT_DEFECTS: &str = r#"{
  "messages": [
    {"creator": null, "text": "null creator", "created_date": null},
    {"creator": {"name": null, "email": 42}, "text": "odd creator fields", "created_date": "yesterday"},
    {"creator": {"name": "Cy"}, "created_date": "2024-01-01T00:00:00"},
    {"creator": {"name": "Cy"}, "text": 17},
    "not an object",
    [1, 2, 3],
    {"creator": {"name": "Cy", "email": "cy@x.com"}, "text": "   ", "created_date": "Jan 2"},
    {"creator": {"name": "Cy", "email": "cy@x.com"}, "text": "ok", "created_date": "2024-01-02 08:00:00", "extra": {"k": "v"}}
  ]
}"#;

pub const CORPUS_WELL_FORMED: &[&str] = &[CHAT_SINGLE, CHAT_TWO_DAYS];
pub const CORPUS_ALL_VALID: &[&str] =
    &[CHAT_SINGLE, CHAT_DELETED_USER, CHAT_NO_MESSAGES, CHAT_TWO_DAYS, CHAT_DEFECTS];

/// Documents that must be rejected as malformed.
pub const MALFORMED_DOCUMENTS: &[&str] = &[
    NOT_JSON,
    "",
    "[]",
    "42",
    r#""messages""#,
    r#"{"messages": {"0": {"text": "hi"}}}"#,
    r#"{"messages": "hi"}"#,
    r#"{"messages": [ {"text": "hi"} "#,
];

/// Write `contents` to `dir/name` and return the full path.
pub fn write_chat(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
