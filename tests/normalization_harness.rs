#![allow(unused)]
//! Normalizer integration harness.
//!
//! # What this covers
//!
//! - **End-to-end scenarios**: the four canonical inputs (well-formed,
//!   deleted user, no `messages`, not JSON) through the public API.
//! - **Field defects**: null and wrong-typed fields, non-object elements,
//!   unparsable and partial dates.
//! - **Output invariants**: every record has text, a name, and either an
//!   empty or a canonical timestamp, over every fixture corpus.
//! - **Laws** (proptest): the normaliser is an order-preserving filter, and
//!   re-normalising its output changes nothing.
//! - **Insta snapshots**: the full record set for the mixed-date fixture.
//!
//! # Running
//!
//! ```sh
//! cargo test --test normalization_harness
//! # Update snapshots after intentional changes:
//! cargo insta review
//! ```

mod common;
use common::*;

use chatview_core::{
    format::{format_calendar_date, format_clock_time},
    normalize_str,
    timestamp::ParseOptions,
    MalformedInputError, NormalizedMessage, Normalizer,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_single_message() {
    let out = normalize_str(CHAT_SINGLE).unwrap();
    assert_eq!(
        out,
        vec![MessageBuilder::new("hi").name("Ann").email("a@x.com").at("2024-03-01T09:05:00").build()]
    );
    assert_eq!(format_clock_time(&out[0].timestamp), "9:05 AM");
    assert_eq!(format_calendar_date(&out[0].timestamp), "01 Mar 2024");
}

#[test]
fn scenario_b_deleted_user() {
    let out = normalize_str(CHAT_DELETED_USER).unwrap();
    assert_eq!(out, vec![MessageBuilder::new("hello").build()]);
}

#[test]
fn scenario_c_no_messages_key() {
    assert!(normalize_str(CHAT_NO_MESSAGES).unwrap().is_empty());
    assert!(normalize_str(r#"{"messages": null}"#).unwrap().is_empty());
    assert!(normalize_str(r#"{"messages": []}"#).unwrap().is_empty());
}

#[test]
fn scenario_d_not_json() {
    let err: MalformedInputError = normalize_str(NOT_JSON).unwrap_err();
    assert!(err.to_string().starts_with("malformed chat export"), "{err}");
}

#[test]
fn malformed_documents_are_rejected() {
    for doc in MALFORMED_DOCUMENTS {
        assert!(normalize_str(doc).is_err(), "accepted malformed document {doc:?}");
    }
}

// ---------------------------------------------------------------------------
// Field defects
// ---------------------------------------------------------------------------

#[test]
fn defects_never_escalate() {
    let out = normalize_str(CHAT_DEFECTS).unwrap();
    assert_texts!(out, ["null creator", "odd creator fields", "   ", "ok"]);

    assert_eq!(out[0].name, "Deleted User");
    assert_eq!(out[0].email, "");
    assert_eq!(out[0].timestamp, "");

    assert_eq!(out[1].name, "Deleted User");
    assert_eq!(out[1].email, "", "numeric email is treated as missing");
    assert_eq!(out[1].timestamp, "", "\"yesterday\" is not a date");

    assert_eq!(out[2].timestamp, "", "a date without a year resolves to nothing");
    assert_eq!(out[3].timestamp, "2024-01-02T08:00:00");
}

#[test]
fn mixed_date_styles_resolve() {
    let out = normalize_str(CHAT_TWO_DAYS).unwrap();
    let stamps: Vec<&str> = out.iter().map(|m| m.timestamp.as_str()).collect();
    assert_eq!(
        stamps,
        vec![
            "2024-03-07T18:15:02+00:00",
            "2024-03-07T18:20:45+00:00",
            "2024-03-08T19:04:00",
            "2024-03-08T19:06:00",
        ]
    );
    let clocks: Vec<String> = out.iter().map(|m| format_clock_time(&m.timestamp)).collect();
    assert_eq!(clocks, vec!["6:15 PM", "6:20 PM", "7:04 PM", "7:06 PM"]);
}

#[test]
fn day_first_option_changes_numeric_dates() {
    let doc = ExportBuilder::new().message("Ann", "", "hi", "03/01/2024 10:00").to_json();

    let month_first = Normalizer::default().normalize_str(&doc).unwrap();
    let day_first = Normalizer::new(ParseOptions { day_first: true }).normalize_str(&doc).unwrap();

    assert_eq!(month_first[0].timestamp, "2024-03-01T10:00:00");
    assert_eq!(day_first[0].timestamp, "2024-01-03T10:00:00");
}

// ---------------------------------------------------------------------------
// Output invariants over every corpus
// ---------------------------------------------------------------------------

#[rstest]
#[case::single(CHAT_SINGLE)]
#[case::deleted_user(CHAT_DELETED_USER)]
#[case::no_messages(CHAT_NO_MESSAGES)]
#[case::two_days(CHAT_TWO_DAYS)]
#[case::defects(CHAT_DEFECTS)]
fn output_invariants_hold(#[case] doc: &str) {
    let out = normalize_str(doc).unwrap();
    assert_normalized!(out);
}

#[test]
fn well_formed_corpus_keeps_every_texted_message() {
    for doc in CORPUS_WELL_FORMED {
        let value: serde_json::Value = serde_json::from_str(doc).unwrap();
        let with_text = value["messages"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["text"].as_str().is_some_and(|t| !t.is_empty()))
            .count();
        assert_eq!(normalize_str(doc).unwrap().len(), with_text);
    }
}

#[test]
fn every_valid_document_is_accepted() {
    for doc in CORPUS_ALL_VALID {
        assert!(normalize_str(doc).is_ok(), "rejected {doc}");
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[test]
fn two_day_conversation_snapshot() {
    let out = normalize_str(CHAT_TWO_DAYS).unwrap();
    insta::assert_json_snapshot!(out, @r###"
    [
      {
        "name": "Ann",
        "email": "ann@example.com",
        "text": "are we still on for friday?",
        "timestamp": "2024-03-07T18:15:02+00:00"
      },
      {
        "name": "Bob",
        "email": "bob@example.com",
        "text": "yes, 7pm",
        "timestamp": "2024-03-07T18:20:45+00:00"
      },
      {
        "name": "Bob",
        "email": "bob@example.com",
        "text": "running late",
        "timestamp": "2024-03-08T19:04:00"
      },
      {
        "name": "Ann",
        "email": "ann@example.com",
        "text": "no worries",
        "timestamp": "2024-03-08T19:06:00"
      }
    ]
    "###);
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

fn arb_element() -> impl Strategy<Value = serde_json::Value> {
    let name = prop_oneof![Just(None), "[A-Za-z]{1,8}".prop_map(Some)];
    let text = prop_oneof![Just(None), Just(Some(String::new())), "[a-z ]{1,12}".prop_map(Some)];
    let date = prop_oneof![
        Just(None),
        Just(Some("not a date".to_string())),
        (2000i32..2030, 1u32..13, 1u32..29, 0u32..24, 0u32..60).prop_map(|(y, mo, d, h, mi)| {
            Some(format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:00"))
        }),
    ];
    (name, text, date).prop_map(|(name, text, date)| {
        let mut obj = serde_json::Map::new();
        if let Some(name) = name {
            obj.insert("creator".into(), serde_json::json!({ "name": name }));
        }
        if let Some(text) = text {
            obj.insert("text".into(), text.into());
        }
        if let Some(date) = date {
            obj.insert("created_date".into(), date.into());
        }
        serde_json::Value::Object(obj)
    })
}

fn as_raw(messages: &[NormalizedMessage]) -> String {
    let elements: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| {
            serde_json::json!({
                "creator": {"name": m.name, "email": m.email},
                "text": m.text,
                "created_date": m.timestamp,
            })
        })
        .collect();
    serde_json::json!({ "messages": elements }).to_string()
}

proptest! {
    /// Output is exactly the texted inputs, in input order.
    #[test]
    fn order_preserving_filter(elements in prop::collection::vec(arb_element(), 0..24)) {
        let doc = serde_json::json!({ "messages": elements }).to_string();
        let out = normalize_str(&doc).unwrap();

        let expected: Vec<&str> = elements
            .iter()
            .filter_map(|e| e["text"].as_str())
            .filter(|t| !t.is_empty())
            .collect();
        let actual: Vec<&str> = out.iter().map(|m| m.text.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Normalising already-normalised records is the identity.
    #[test]
    fn idempotent(elements in prop::collection::vec(arb_element(), 0..24)) {
        let doc = serde_json::json!({ "messages": elements }).to_string();
        let once = normalize_str(&doc).unwrap();
        let twice = normalize_str(&as_raw(&once)).unwrap();
        prop_assert_eq!(once, twice);
    }
}
