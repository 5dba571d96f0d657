//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Switch focus: chats ↔ thread"),
    ("↑ k  /  ↓ j", "Move cursor or scroll one row"),
    ("Enter", "Show the chat under the cursor"),
    ("PageUp  /  Ctrl+u", "Scroll thread up a page"),
    ("PageDown / Ctrl+d", "Scroll thread down a page"),
    ("g  /  G", "Jump to first / last"),
    (":", "Open the command bar"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":open <path>", "Import a chat export"),
    (":export <path>", "Export the shown chat (.txt .md .jsonl)"),
    (":theme <name>", "Switch theme (default, gruvbox)"),
    (":email", "Toggle email addresses"),
    (":q", "Quit"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 3) as u16;
        let popup = centered_rect(64, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" chatview keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let row = |(key, desc): &(&str, &str)| {
            Line::from(vec![
                Span::styled(format!("  {key:<20}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(desc.to_string()),
            ])
        };

        let mut lines: Vec<Line> = BINDINGS.iter().map(row).collect();
        lines.push(Line::default());
        lines.extend(COMMANDS.iter().map(row));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
