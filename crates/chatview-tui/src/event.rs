//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `g` / `Home`            | `ScrollToTop`              |
//! | `G` / `End`             | `ScrollToBottom`           |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the command bar is open the event loop calls
//! [`to_app_event_insert`] instead, so every printable key types itself and
//! only `Ctrl+c`, `Escape`, `Enter`, `Tab`, `Backspace` and the arrows keep
//! their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Scroll the thread up one page.
    ScrollUp,
    /// Scroll the thread down one page.
    ScrollDown,
    /// Jump to the first message.
    ScrollToTop,
    /// Jump to the last message.
    ScrollToBottom,
    /// Move within the focused pane (or the text cursor in insert mode).
    Nav(Direction),
    /// A printable character.
    Char(char),
    /// Delete the character before the cursor in the command bar.
    Backspace,
    /// Confirm the command bar or open the session under the cursor.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (command bar, help popup).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for mouse events, key releases, and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for the command bar.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        // 'G' may or may not carry SHIFT depending on the terminal
        Char('G') => Some(AppEvent::ScrollToBottom),
        End => Some(AppEvent::ScrollToBottom),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::ScrollToTop),
        Home => Some(AppEvent::ScrollToTop),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn top_and_bottom() {
        assert_eq!(to_app_event(press(KeyCode::Char('g'))), Some(AppEvent::ScrollToTop));
        assert_eq!(to_app_event(press(KeyCode::Home)), Some(AppEvent::ScrollToTop));
        assert_eq!(
            to_app_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(AppEvent::ScrollToBottom)
        );
        assert_eq!(to_app_event(press(KeyCode::End)), Some(AppEvent::ScrollToBottom));
    }

    #[test]
    fn nav_arrows_and_hjkl() {
        assert_eq!(to_app_event(press(KeyCode::Up)), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(to_app_event(press(KeyCode::Char('j'))), Some(AppEvent::Nav(Direction::Down)));
        assert_eq!(to_app_event(press(KeyCode::Char('h'))), Some(AppEvent::Nav(Direction::Left)));
        assert_eq!(to_app_event(press(KeyCode::Right)), Some(AppEvent::Nav(Direction::Right)));
    }

    #[test]
    fn page_scroll() {
        assert_eq!(to_app_event(press(KeyCode::PageUp)), Some(AppEvent::ScrollUp));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('d'))), Some(AppEvent::ScrollDown));
    }

    #[test]
    fn colon_and_question_are_chars() {
        assert_eq!(to_app_event(press(KeyCode::Char(':'))), Some(AppEvent::Char(':')));
        assert_eq!(
            to_app_event(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char('?'))
        );
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }

    #[test]
    fn insert_mode_nav_letters_are_chars() {
        for ch in ['h', 'j', 'k', 'l', 'q', 'g', 'G'] {
            assert_eq!(
                to_app_event_insert(press(KeyCode::Char(ch))),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char, not a nav event"
            );
        }
    }

    #[test]
    fn insert_mode_ctrl_c_still_quits() {
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }
}
