//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` from either pane. Displays a `:` prefix followed
//! by the typed command. The app shell parses the input on `Enter` (see
//! [`Command::parse`](crate::commands::Command::parse)); `Escape` cancels.
//! This module only owns the line editor.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
    /// Error from the last failed parse, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.error = None;
    }

    /// Edit the input line. `Enter` and `Escape` are handled by the caller.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;

        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.input.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.input[self.cursor..]
                    .chars()
                    .next()
                    .map(|c| self.cursor + c.len_utf8())
                    .unwrap_or(self.input.len());
            }
            _ => {}
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input[..self.cursor].chars().count() as u16;
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(format!("E  {err}"), self.theme.status_error))
        } else {
            Line::from(vec![
                Span::styled(":", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.state.input.as_str()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> CommandBarState {
        let mut state = CommandBarState::default();
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn char_insert_and_backspace() {
        let mut s = typed("foo");
        assert_eq!(s.input, "foo");
        assert_eq!(s.cursor, 3);
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.input, "fo");
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut s = typed("aé");
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 1);
        s.handle(&AppEvent::Char('x'));
        assert_eq!(s.input, "axé");
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, s.input.len());
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, s.input.len());
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut s = CommandBarState::default();
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.input, "");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn error_cleared_on_next_key() {
        let mut s = CommandBarState::default();
        s.error = Some("oops".to_string());
        s.handle(&AppEvent::Char('x'));
        assert!(s.error.is_none());
    }

    #[test]
    fn cursor_col_accounts_for_prefix() {
        let s = typed("open");
        let area = Rect::new(0, 0, 80, 1);
        assert_eq!(s.cursor_col(area), 5);
    }
}
