//! Status line: the bottom row, showing the result of the last command.

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

/// Outcome of a command, shown until the next one runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct StatusLine<'a> {
    status: Option<&'a Status>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a Status>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.status {
            Some(Status::Info(msg)) => Line::styled(format!(" {msg}"), self.theme.status_info),
            Some(Status::Error(msg)) => Line::styled(format!(" {msg}"), self.theme.status_error),
            None => return,
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
