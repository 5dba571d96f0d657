//! Loose timestamp parsing for the `created_date` field of chat exports.
//!
//! Chat platforms write dates in whatever shape their locale produced, so
//! [`parse_loose`] tries RFC 3339 and RFC 2822 first, then cleans the string
//! (weekday prefixes, ordinals, `at`, glued `am`/`pm`, trailing zone names)
//! and walks a list of date and time patterns. Zone abbreviations without a
//! fixed offset (`EST`, `CET`) are dropped and the wall-clock time is kept. Anything it cannot pin to a
//! full calendar date, including strings without a year, is rejected.
//!
//! [`LooseTimestamp::to_iso`] produces the canonical string stored in
//! [`NormalizedMessage::timestamp`](crate::NormalizedMessage), and
//! [`parse_canonical`] reads it back for display.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Knobs for the ambiguous parts of loose date parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Read `03/01/2024` as 3 January instead of 1 March.
    pub day_first: bool,
}

/// A parsed wall-clock instant plus the offset it was written with, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LooseTimestamp {
    pub local: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl LooseTimestamp {
    fn naive(local: NaiveDateTime) -> Self {
        Self { local, offset: None }
    }

    fn zoned(dt: DateTime<FixedOffset>) -> Self {
        Self { local: dt.naive_local(), offset: Some(*dt.offset()) }
    }

    /// Canonical ISO-8601 form: `YYYY-MM-DDTHH:MM:SS[.ffffff][±HH:MM]`.
    ///
    /// Microseconds are written only when non-zero; the offset only when the
    /// source carried one.
    pub fn to_iso(&self) -> String {
        let mut out = self.local.format("%Y-%m-%dT%H:%M:%S").to_string();
        let micros = self.local.nanosecond() % 1_000_000_000 / 1_000;
        if micros != 0 {
            out.push_str(&format!(".{micros:06}"));
        }
        if let Some(offset) = self.offset {
            let secs = offset.local_minus_utc();
            let sign = if secs < 0 { '-' } else { '+' };
            let secs = secs.abs();
            out.push_str(&format!("{sign}{:02}:{:02}", secs / 3600, secs % 3600 / 60));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Date layouts that are unambiguous regardless of locale.
const FIXED_DATES: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%Y %B %d",
];

/// Purely numeric day/month layouts, month first. Two-digit years come first
/// so `%Y` never swallows `24` as the year 24.
const MONTH_FIRST_DATES: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y"];
const DAY_FIRST_DATES: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Time layouts appended to every date layout. `%.f` also matches no fraction.
const TIMES: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p", "%I %p"];

/// ISO 8601 basic format, `20240301T090500` once the `T` is split off.
const COMPACT: &[(&str, bool)] = &[
    ("%Y%m%d %H%M%S%.f", true),
    ("%Y%m%d %H%M", true),
    ("%Y%m%d", false),
];

fn patterns(day_first: bool) -> &'static [(String, bool)] {
    static MONTH_FIRST: OnceLock<Vec<(String, bool)>> = OnceLock::new();
    static DAY_FIRST: OnceLock<Vec<(String, bool)>> = OnceLock::new();

    let (cell, numeric) = if day_first {
        (&DAY_FIRST, DAY_FIRST_DATES)
    } else {
        (&MONTH_FIRST, MONTH_FIRST_DATES)
    };

    cell.get_or_init(|| {
        // (pattern, has_time)
        let mut out = Vec::new();
        for date in FIXED_DATES.iter().chain(numeric) {
            for time in TIMES {
                out.push((format!("{date} {time}"), true));
            }
            out.push((date.to_string(), false));
        }
        out.extend(COMPACT.iter().map(|(p, has_time)| (p.to_string(), *has_time)));
        out
    })
}

fn weekday_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+")
            .expect("valid weekday regex")
    })
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid ordinal regex")
    })
}

fn meridiem_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d)\s*([ap])\.?m\.?(\s|$)").expect("valid meridiem regex")
    })
}

fn month_abbrev_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sept?|oct|nov|dec)\.").expect("valid month regex")
    })
}

fn sept_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bsept\b").expect("valid sept regex"))
}

fn decimal_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(:\d{2}),(\d+)").expect("valid decimal comma regex"))
}

fn iso_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d)[Tt](\d)").expect("valid separator regex"))
}

fn zone_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?P<body>.+?)\s*(?P<tz>z|(?:utc|gmt)(?:[+-]\d{1,2}(?::?\d{2})?)?|[+-]\d{2}:?\d{2})$")
            .expect("valid zone regex")
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a loosely formatted date/time string.
///
/// Returns `None` for empty input, unrecognised layouts, and partial dates
/// that would need a default year or day to be filled in.
pub fn parse_loose(input: &str, opts: ParseOptions) -> Option<LooseTimestamp> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(LooseTimestamp::zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(LooseTimestamp::zoned(dt));
    }

    let cleaned = clean(input);
    let (body, offset) = split_zone(&cleaned);

    let local = parse_naive(body, opts)?;
    match offset {
        Some(offset) => Some(LooseTimestamp { local, offset: Some(offset) }),
        None => Some(LooseTimestamp::naive(local)),
    }
}

/// Read a canonical timestamp (as written by [`LooseTimestamp::to_iso`]) and
/// return its wall-clock value. Also accepts a bare `YYYY-MM-DD` date.
pub fn parse_canonical(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M") {
        return Some(naive);
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn clean(input: &str) -> String {
    let s = weekday_re().replace(input, "");
    let s = ordinal_re().replace_all(&s, "${1}");
    let s = month_abbrev_re().replace_all(&s, "${1}");
    // chrono knows `Sep` and `September` only.
    let s = sept_re().replace_all(&s, "Sep");
    let s = decimal_comma_re().replace_all(&s, "${1}.${2}");
    let s = iso_separator_re().replace_all(&s, "${1} ${2}");
    let s = meridiem_re().replace_all(&s, |caps: &Captures| {
        format!("{} {}M ", &caps[1], caps[2].to_ascii_uppercase())
    });
    let s = s.replace(',', " ");

    s.split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("at"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_time(body: &str) -> bool {
    body.contains(':') || body.to_ascii_uppercase().ends_with('M')
}

/// Split a trailing zone designator off `s`. Only strings that carry a time
/// of day can carry a zone.
fn split_zone(s: &str) -> (&str, Option<FixedOffset>) {
    let Some(caps) = zone_suffix_re().captures(s) else {
        return (strip_zone_name(s), None);
    };
    let (Some(body), Some(tz)) = (caps.name("body"), caps.name("tz")) else {
        return (s, None);
    };
    let body = body.as_str();
    if !has_time(body) {
        return (s, None);
    }

    let tz = tz.as_str();
    let offset = if tz.eq_ignore_ascii_case("z") {
        FixedOffset::east_opt(0)
    } else if let Some(rest) = strip_prefix_ci(tz, "utc").or_else(|| strip_prefix_ci(tz, "gmt")) {
        if rest.is_empty() {
            FixedOffset::east_opt(0)
        } else {
            parse_numeric_offset(rest)
        }
    } else {
        parse_numeric_offset(tz)
    };

    match offset {
        Some(offset) => (body, Some(offset)),
        None => (s, None),
    }
}

/// Drop a trailing zone abbreviation with no fixed offset. The alphabetic
/// run must be a whole word of 2 to 5 letters following a time of day or a
/// number.
fn strip_zone_name(s: &str) -> &str {
    let body = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let name = &s[body.len()..];
    if !(2..=5).contains(&name.len())
        || name.eq_ignore_ascii_case("am")
        || name.eq_ignore_ascii_case("pm")
    {
        return s;
    }
    let body = body.trim_end();
    if has_time(body) || body.ends_with(|c: char| c.is_ascii_digit()) {
        body
    } else {
        s
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// `±HH:MM`, `±HHMM` or `±H`.
fn parse_numeric_offset(tz: &str) -> Option<FixedOffset> {
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let digits: String = tz.get(1..)?.chars().filter(|c| c.is_ascii_digit()).collect();
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// First pattern that consumes all of `s`. Matches landing before year 1000
/// mean a short year was read as `%Y` (`3/1/24` as year 3) and are skipped.
fn parse_naive(s: &str, opts: ParseOptions) -> Option<NaiveDateTime> {
    patterns(opts.day_first)
        .iter()
        .filter_map(|(pattern, has_time)| {
            if *has_time {
                NaiveDateTime::parse_from_str(s, pattern).ok()
            } else {
                NaiveDate::parse_from_str(s, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            }
        })
        .find(|naive| naive.year() >= 1000)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
