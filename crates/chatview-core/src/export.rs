//! Export layer: writes a conversation out as a document.
//!
//! [`build_document`] lays a conversation out as a titled list of entries,
//! one per message: a `"<clock-time> - <name> (<email>)"` header followed by
//! the message text. [`DocumentExporter`] implementations render that layout
//! to bytes. Three formats ship:
//!
//! | Format | Output |
//! |--------|--------|
//! | `text` | title underlined with `=`, entries separated by blank lines |
//! | `markdown` | `# title`, bold entry headers, text as paragraphs |
//! | `jsonl` | one [`NormalizedMessage`] JSON object per line, no title |

use crate::error::ExportError;
use crate::format::format_clock_time;
use crate::types::NormalizedMessage;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Title used when the caller has none.
pub const DEFAULT_TITLE: &str = "Chat Export";

/// A conversation laid out for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Top-level heading.
    pub title: String,
    pub entries: Vec<DocumentEntry>,
}

/// One message in a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// `"<clock-time> - <name> (<email>)"`.
    pub header: String,
    pub text: String,
}

/// Lay out `messages` under `title`, preserving order. A blank title becomes
/// [`DEFAULT_TITLE`].
pub fn build_document(title: &str, messages: &[NormalizedMessage]) -> Document {
    let title = if title.trim().is_empty() { DEFAULT_TITLE } else { title };
    let entries = messages
        .iter()
        .map(|m| DocumentEntry {
            header: format!("{} - {} ({})", format_clock_time(&m.timestamp), m.name, m.email),
            text: m.text.clone(),
        })
        .collect();
    Document { title: title.to_string(), entries }
}

/// Renders a titled conversation to a writer.
pub trait DocumentExporter {
    fn export(
        &self,
        title: &str,
        messages: &[NormalizedMessage],
        out: &mut dyn Write,
    ) -> Result<(), ExportError>;
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// Output format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Markdown,
    Jsonl,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Text, ExportFormat::Markdown, ExportFormat::Jsonl];

    /// Infer a format from a file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "jsonl" | "ndjson" => Some(ExportFormat::Jsonl),
            "txt" => Some(ExportFormat::Text),
            _ => None,
        }
    }

    pub fn exporter(self) -> &'static dyn DocumentExporter {
        match self {
            ExportFormat::Text => &TextExporter,
            ExportFormat::Markdown => &MarkdownExporter,
            ExportFormat::Jsonl => &JsonlExporter,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl DocumentExporter for TextExporter {
    fn export(
        &self,
        title: &str,
        messages: &[NormalizedMessage],
        out: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let doc = build_document(title, messages);
        writeln!(out, "{}", doc.title)?;
        writeln!(out, "{}", "=".repeat(doc.title.chars().count().max(1)))?;
        for entry in &doc.entries {
            writeln!(out)?;
            writeln!(out, "{}", entry.header)?;
            writeln!(out, "{}", entry.text)?;
        }
        Ok(())
    }
}

/// CommonMark. Names, emails and message text are escaped so they render
/// literally; line breaks inside a message become hard breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter;

impl DocumentExporter for MarkdownExporter {
    fn export(
        &self,
        title: &str,
        messages: &[NormalizedMessage],
        out: &mut dyn Write,
    ) -> Result<(), ExportError> {
        let doc = build_document(title, messages);
        writeln!(out, "# {}", md_escape(&doc.title).replace('#', "\\#"))?;
        for entry in &doc.entries {
            writeln!(out)?;
            writeln!(out, "**{}**", md_escape(entry.header.trim()))?;
            writeln!(out)?;
            writeln!(out, "{}", md_paragraph(&entry.text))?;
        }
        Ok(())
    }
}

/// Backslash-escape the characters with inline meaning in CommonMark.
fn md_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '&' | '~' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render `text` as a single paragraph. Block markers at the start of a line
/// are escaped, leading whitespace is kept as character references, and every
/// line but the last ends in a hard break.
fn md_paragraph(text: &str) -> String {
    let lines: Vec<String> = text
        .trim_end_matches(['\n', '\r'])
        .split('\n')
        .map(|line| md_line(line.trim_end_matches('\r')))
        .collect();
    lines.join("\\\n")
}

fn md_line(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let mut out: String = line[..line.len() - body.len()]
        .chars()
        .map(|c| if c == '\t' { "&#9;" } else { "&#32;" })
        .collect();

    let body = md_escape(body);
    if body.starts_with(['#', '-', '+', '=']) {
        out.push('\\');
        out.push_str(&body);
        return out;
    }
    // `1.` and `1)` open an ordered list.
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && body[digits..].starts_with(['.', ')']) {
        out.push_str(&body[..digits]);
        out.push('\\');
        out.push_str(&body[digits..]);
        return out;
    }
    out.push_str(&body);
    out
}

/// Newline-delimited JSON, one message per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlExporter;

impl DocumentExporter for JsonlExporter {
    fn export(
        &self,
        _title: &str,
        messages: &[NormalizedMessage],
        out: &mut dyn Write,
    ) -> Result<(), ExportError> {
        for message in messages {
            serde_json::to_writer(&mut *out, message)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Export `messages` to a file at `path`, creating or truncating it.
pub fn export_to_path(
    format: ExportFormat,
    title: &str,
    messages: &[NormalizedMessage],
    path: &Path,
) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    format.exporter().export(title, messages, &mut out)?;
    out.flush()?;
    tracing::debug!(
        path = %path.display(),
        format = %format,
        messages = messages.len(),
        "exported conversation"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<NormalizedMessage> {
        vec![
            NormalizedMessage {
                name: "Ann".into(),
                email: "a@x.com".into(),
                text: "hi".into(),
                timestamp: "2024-03-01T09:05:00".into(),
            },
            NormalizedMessage {
                name: "Deleted User".into(),
                email: String::new(),
                text: "who?".into(),
                timestamp: String::new(),
            },
        ]
    }

    fn render(format: ExportFormat, title: &str, messages: &[NormalizedMessage]) -> String {
        let mut buf = Vec::new();
        format.exporter().export(title, messages, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn document_headers() {
        let doc = build_document("t", &sample());
        assert_eq!(doc.entries[0].header, "9:05 AM - Ann (a@x.com)");
        assert_eq!(doc.entries[1].header, " - Deleted User ()");
        assert_eq!(doc.entries[1].text, "who?");
    }

    #[test]
    fn text_layout() {
        let out = render(ExportFormat::Text, "chat.json", &sample());
        assert_eq!(
            out,
            "chat.json\n=========\n\n9:05 AM - Ann (a@x.com)\nhi\n\n - Deleted User ()\nwho?\n"
        );
    }

    #[test]
    fn markdown_layout() {
        let out = render(ExportFormat::Markdown, "chat", &sample()[..1]);
        assert_eq!(out, "# chat\n\n**9:05 AM - Ann (a@x.com)**\n\nhi\n");
    }

    #[test]
    fn markdown_escapes_author_and_text() {
        let messages = vec![NormalizedMessage {
            name: "*bold* [x](y)".into(),
            email: "<a@x.com>".into(),
            text: "# not a heading\n- not a list\n\n1. nor this\n    code? no".into(),
            timestamp: "2024-03-01T09:05:00".into(),
        }];
        let out = render(ExportFormat::Markdown, "#1 chat", &messages);
        assert_eq!(
            out,
            "# \\#1 chat\n\n\
             **9:05 AM - \\*bold\\* \\[x\\](y) (\\<a@x.com\\>)**\n\n\
             \\# not a heading\\\n\
             \\- not a list\\\n\
             \\\n\
             1\\. nor this\\\n\
             &#32;&#32;&#32;&#32;code? no\n"
        );
    }

    #[test]
    fn markdown_drops_trailing_newlines_from_text() {
        let messages = vec![NormalizedMessage {
            name: "Ann".into(),
            email: String::new(),
            text: "bye\r\n".into(),
            timestamp: String::new(),
        }];
        let out = render(ExportFormat::Markdown, "t", &messages);
        assert!(out.ends_with("\n\nbye\n"), "{out:?}");
    }

    #[test]
    fn jsonl_one_object_per_line() {
        let out = render(ExportFormat::Jsonl, "ignored", &sample());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: NormalizedMessage = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back, sample()[0]);
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        assert_eq!(build_document("  ", &[]).title, "Chat Export");
        assert_eq!(render(ExportFormat::Markdown, "", &[]), "# Chat Export\n");
    }

    #[test]
    fn empty_conversation_has_title_only() {
        assert_eq!(render(ExportFormat::Markdown, "empty", &[]), "# empty\n");
        assert_eq!(render(ExportFormat::Jsonl, "empty", &[]), "");
    }

    #[test]
    fn format_from_str_and_path() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("docx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::from_path(Path::new("out.jsonl")), Some(ExportFormat::Jsonl));
        assert_eq!(ExportFormat::from_path(Path::new("out.docx")), None);
        for f in ExportFormat::ALL {
            assert_eq!(f.to_string().parse::<ExportFormat>().unwrap(), f);
        }
    }
}
