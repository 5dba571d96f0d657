//! chatview TUI: ratatui application shell.
//!
//! Two panes: the imported chats on the left and the selected conversation,
//! rendered as chat bubbles, on the right. A vim-style command bar imports
//! and exports chats while the app is running.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod thread;
pub mod widgets;

pub use app::App;

use chatview_core::{config::Config, Normalizer, SessionStore};

/// Start the TUI over an already-populated session store.
///
/// The theme named in `config.ui.theme` is used, falling back to the default
/// theme when the name is unknown.
pub fn run(store: SessionStore, config: Config, normalizer: Normalizer) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    App::new(store, config, theme, normalizer).run()
}
