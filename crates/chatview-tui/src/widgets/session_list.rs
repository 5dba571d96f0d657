//! Session list widget: the imported chats in the left pane.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `Enter` shows the session under the cursor in the thread pane.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use chatview_core::SessionStore;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

#[derive(Debug, Default)]
pub struct SessionListState {
    /// Index into the store's insertion order.
    pub cursor: usize,
}

impl SessionListState {
    /// Move the cursor. `len` is the number of sessions in the store.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = len.saturating_sub(1),
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, "sessions: cursor moved");
    }

    pub fn select(&mut self, index: usize) {
        self.cursor = index;
    }
}

pub struct SessionList<'a> {
    store: &'a SessionStore,
    state: &'a SessionListState,
    /// Session currently shown in the thread pane.
    active: Option<usize>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SessionList<'a> {
    pub fn new(
        store: &'a SessionStore,
        state: &'a SessionListState,
        active: Option<usize>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { store, state, active, focused, theme }
    }
}

impl Widget for SessionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" Chats ({}) ", self.store.len()))
            .border_style(self.theme.border(self.focused));

        if self.store.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_line(
                inner.x,
                inner.y,
                &Line::styled("no chats imported", self.theme.placeholder),
                inner.width,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .store
            .iter()
            .enumerate()
            .map(|(i, session)| {
                let marker = if Some(i) == self.active { "● " } else { "  " };
                let style = if Some(i) == self.active {
                    self.theme.sidebar_active
                } else {
                    Default::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(session.label.clone(), style),
                    Span::styled(format!(" {}", session.messages.len()), self.theme.placeholder),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.cursor.min(self.store.len() - 1)));

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.sidebar_cursor);

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
