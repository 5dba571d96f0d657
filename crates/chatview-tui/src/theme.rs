//! Colour theme for the chatview TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`], so the application works without any files on disk.
//! Call [`Theme::by_name`] (or [`Theme::load_default`]) at startup and pass
//! the result through the application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::thread::Side;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBubbles {
    left: RawStyle,
    right: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    author: RawStyle,
    email: RawStyle,
    time: RawStyle,
    date_separator: RawStyle,
    placeholder: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSidebar {
    cursor: RawStyle,
    active: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    info: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    bubbles: RawBubbles,
    text: RawText,
    borders: RawBorders,
    sidebar: RawSidebar,
    status: RawStatus,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values; no allocation at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Bubble for the first author.
    pub bubble_left: Style,
    /// Bubble for everyone else.
    pub bubble_right: Style,

    /// Patched over the bubble style for the author / email / time rows.
    pub author: Style,
    pub email: Style,
    pub time: Style,
    pub date_separator: Style,
    /// "No messages to show" and "Select a chat".
    pub placeholder: Style,

    pub border_focused: Style,
    pub border_unfocused: Style,

    /// Session list row under the cursor.
    pub sidebar_cursor: Style,
    /// Session currently shown in the thread pane.
    pub sidebar_active: Style,

    pub status_info: Style,
    pub status_error: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up an embedded theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            bubble_left: raw.bubbles.left.into_style(),
            bubble_right: raw.bubbles.right.into_style(),
            author: raw.text.author.into_style(),
            email: raw.text.email.into_style(),
            time: raw.text.time.into_style(),
            date_separator: raw.text.date_separator.into_style(),
            placeholder: raw.text.placeholder.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            sidebar_cursor: raw.sidebar.cursor.into_style(),
            sidebar_active: raw.sidebar.active.into_style(),
            status_info: raw.status.info.into_style(),
            status_error: raw.status.error.into_style(),
        })
    }

    pub fn bubble(&self, side: Side) -> Style {
        match side {
            Side::Left => self.bubble_left,
            Side::Right => self.bubble_right,
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
