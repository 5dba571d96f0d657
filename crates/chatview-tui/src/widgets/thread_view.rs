//! Thread view widget: the scrollable conversation pane on the right.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one row |
//! | `↓` / `j` | Scroll down one row |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `g` / `G` | Jump to first / last message |
//!
//! # Layout
//!
//! Each message is a bubble of at most [`BUBBLE_WIDTH_PCT`] of the pane:
//! author, email, wrapped text, and a right-aligned clock time. Bubbles for
//! the first author hug the left edge; all others hug the right edge. Date
//! separators are centred between bubbles.

use std::cell::Cell;
use std::sync::Arc;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::thread::{thread_items, Side, ThreadItem};
use chatview_core::format::format_clock_time;
use chatview_core::NormalizedMessage;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;
const BUBBLE_WIDTH_PCT: usize = 70;
const BUBBLE_PAD: usize = 1;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ThreadViewState {
    /// Label of the session on screen, or `None` before anything is selected.
    pub title: Option<String>,
    pub messages: Arc<[NormalizedMessage]>,
    pub items: Vec<ThreadItem>,
    /// Index of the first visible row.
    pub scroll: usize,
    pub show_email: bool,
    /// Cached from the last render so `handle()` can clamp scrolling.
    last_height: Cell<usize>,
    last_total: Cell<usize>,
}

impl Default for ThreadViewState {
    fn default() -> Self {
        Self {
            title: None,
            messages: Arc::from(Vec::new()),
            items: Vec::new(),
            scroll: 0,
            show_email: true,
            last_height: Cell::new(40),
            last_total: Cell::new(0),
        }
    }
}

impl ThreadViewState {
    /// Show a session, starting from its first message.
    pub fn load(&mut self, title: &str, messages: Arc<[NormalizedMessage]>) {
        self.items = thread_items(&messages);
        self.messages = messages;
        self.title = Some(title.to_string());
        self.scroll = 0;
        self.last_total.set(0);
        tracing::debug!(title, items = self.items.len(), "thread: loaded session");
    }

    fn max_scroll(&self) -> usize {
        self.last_total.get().saturating_sub(self.last_height.get().max(1))
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let max = self.max_scroll();
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.scroll = (self.scroll + 1).min(max);
            }
            AppEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.scroll = (self.scroll + PAGE_STEP).min(max);
            }
            AppEvent::ScrollToTop => {
                self.scroll = 0;
            }
            AppEvent::ScrollToBottom => {
                self.scroll = max;
            }
            _ => return,
        }
        tracing::debug!(scroll = self.scroll, max, "thread: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ThreadView<'a> {
    state: &'a ThreadViewState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ThreadView<'a> {
    pub fn new(state: &'a ThreadViewState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ThreadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self.state.title.as_deref().unwrap_or("Select a chat");
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        // One column on the right is reserved for the scrollbar.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let lines = if self.state.title.is_none() {
            vec![Line::styled("Import a chat with :open <path>", self.theme.placeholder)]
        } else if self.state.items.is_empty() {
            vec![Line::styled("No messages to show", self.theme.placeholder).centered()]
        } else {
            thread_lines(
                &self.state.messages,
                &self.state.items,
                text_area.width as usize,
                self.state.show_email,
                self.theme,
            )
        };

        let height = text_area.height as usize;
        let total = lines.len();
        // Cache for handle(); draw always runs before handle().
        self.state.last_height.set(height);
        self.state.last_total.set(total);

        let scroll = self.state.scroll.min(total.saturating_sub(height));
        let visible: Vec<Line> = lines.into_iter().skip(scroll).take(height).collect();
        Paragraph::new(visible).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total.saturating_sub(height))
                .position(scroll)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Line building
// ---------------------------------------------------------------------------

/// Render thread items to display rows for a pane `width` columns wide.
pub fn thread_lines(
    messages: &[NormalizedMessage],
    items: &[ThreadItem],
    width: usize,
    show_email: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let bubble_width = (width * BUBBLE_WIDTH_PCT / 100).max(12).min(width.max(1));
    let inner_width = bubble_width.saturating_sub(2 * BUBBLE_PAD).max(1);

    let mut lines = Vec::new();
    for item in items {
        match item {
            ThreadItem::DateSeparator(date) => {
                lines.push(Line::default());
                lines.push(
                    Line::from(Span::styled(format!(" {date} "), theme.date_separator))
                        .alignment(Alignment::Center),
                );
            }
            ThreadItem::Message { index, side } => {
                let Some(message) = messages.get(*index) else {
                    continue;
                };
                lines.push(Line::default());
                lines.extend(bubble_lines(message, *side, inner_width, show_email, theme));
            }
        }
    }
    lines
}

fn bubble_lines(
    message: &NormalizedMessage,
    side: Side,
    inner_width: usize,
    show_email: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let base = theme.bubble(side);
    let align = match side {
        Side::Left => Alignment::Left,
        Side::Right => Alignment::Right,
    };

    let mut rows: Vec<(String, Style)> = Vec::new();
    rows.push((message.name.clone(), base.patch(theme.author)));
    if show_email && !message.email.is_empty() {
        rows.push((message.email.clone(), base.patch(theme.email)));
    }
    for chunk in wrap_text(&message.text, inner_width) {
        rows.push((chunk, base));
    }

    let clock = format_clock_time(&message.timestamp);
    let mut out: Vec<Line<'static>> = rows
        .into_iter()
        .map(|(text, style)| bubble_row(&pad_right(&text, inner_width), style, base, align))
        .collect();
    if !clock.is_empty() {
        out.push(bubble_row(
            &pad_left(&clock, inner_width),
            base.patch(theme.time),
            base,
            align,
        ));
    }
    out
}

fn bubble_row(content: &str, style: Style, base: Style, align: Alignment) -> Line<'static> {
    let pad = " ".repeat(BUBBLE_PAD);
    Line::from(vec![
        Span::styled(pad.clone(), base),
        Span::styled(content.to_string(), style),
        Span::styled(pad, base),
    ])
    .alignment(align)
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{s}", " ".repeat(width.saturating_sub(len)))
}

/// Greedy word wrap on character counts. Words longer than `width` are split;
/// explicit newlines are kept; blank lines survive as empty rows.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words that cannot fit on any line.
            while word.len() > width {
                if current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width && current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        out.push(current);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
