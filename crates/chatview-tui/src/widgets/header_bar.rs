//! Header bar widget: the 1-line strip at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const HINT: &str = " q:quit  ?:help  :cmd ";

/// Shows the application name, the chat on screen and its message count.
/// Keybinding hints are right-aligned in the same row.
pub struct HeaderBar<'a> {
    title: Option<&'a str>,
    messages: usize,
    _theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(title: Option<&'a str>, messages: usize, theme: &'a Theme) -> Self {
        Self { title, messages, _theme: theme }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            " chatview ",
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )];
        if let Some(title) = self.title {
            spans.push(Span::styled(format!(" {title} "), Style::default().add_modifier(Modifier::BOLD)));
            let noun = if self.messages == 1 { "message" } else { "messages" };
            spans.push(Span::styled(
                format!("· {} {noun}", self.messages),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint_x = area.right().saturating_sub(HINT.len() as u16);
        buf.set_string(hint_x, area.y, HINT, Style::default().add_modifier(Modifier::DIM));
    }
}
