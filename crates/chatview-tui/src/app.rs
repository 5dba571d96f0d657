//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header_bar::HeaderBar,
        help::HelpPopup,
        session_list::{SessionList, SessionListState},
        status_line::{Status, StatusLine},
        thread_view::{ThreadView, ThreadViewState},
    },
};
use chatview_core::{config::Config, Normalizer, SessionStore};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sessions,
    Thread,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: SessionStore,
    /// Index of the session shown in the thread pane.
    pub active: Option<usize>,
    pub sessions: SessionListState,
    pub thread: ThreadViewState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub normalizer: Normalizer,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub status: Option<Status>,
    pub quit: bool,
}

impl AppState {
    /// Build the initial state. The first session, if any, is shown.
    pub fn new(store: SessionStore, config: Config, theme: Theme, normalizer: Normalizer) -> Self {
        let mut thread = ThreadViewState::default();
        thread.show_email = config.ui.show_email;

        let mut state = AppState {
            store,
            active: None,
            sessions: SessionListState::default(),
            thread,
            focus: Focus::Sessions,
            prev_focus: Focus::Sessions,
            theme,
            config,
            normalizer,
            show_help: false,
            command_bar: CommandBarState::default(),
            status: None,
            quit: false,
        };
        if !state.store.is_empty() {
            state.show_session(0);
        }
        state
    }

    /// Show the session at `index` and move the list cursor onto it.
    pub fn show_session(&mut self, index: usize) {
        let Some(session) = self.store.get_index(index) else {
            return;
        };
        self.thread.load(&session.label, session.messages.clone());
        self.active = Some(index);
        self.sessions.select(index);
    }

    /// Label of the session on screen.
    pub fn active_label(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.store.get_index(i))
            .map(|s| s.label.as_str())
    }

    /// Route a semantic event. Exposed for tests; the event loop calls this.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Quit => self.quit = true,
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        // Bar stays open showing the error.
                        Err(msg) => self.command_bar.error = Some(msg),
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Sessions => Focus::Thread,
                    Focus::Thread | Focus::Command => Focus::Sessions,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            // Page keys always drive the thread, whichever pane has focus.
            AppEvent::ScrollUp | AppEvent::ScrollDown => self.thread.handle(&event),

            AppEvent::Enter if self.focus == Focus::Sessions => {
                let index = self.sessions.cursor;
                self.show_session(index);
                self.focus = Focus::Thread;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => match self.focus {
                Focus::Sessions => self.sessions.handle(&other, self.store.len()),
                Focus::Thread => self.thread.handle(&other),
                Focus::Command => {}
            },
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(store: SessionStore, config: Config, theme: Theme, normalizer: Normalizer) -> Self {
        App { state: AppState::new(store, config, theme, normalizer) }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | body | 1-line status / command bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let pct = state.config.ui.sidebar_width_pct.clamp(10, 60);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(
        HeaderBar::new(state.active_label(), state.thread.messages.len(), &state.theme),
        vert[0],
    );
    frame.render_widget(
        SessionList::new(
            &state.store,
            &state.sessions,
            state.active,
            state.focus == Focus::Sessions,
            &state.theme,
        ),
        horiz[0],
    );
    frame.render_widget(
        ThreadView::new(&state.thread, state.focus == Focus::Thread, &state.theme),
        horiz[1],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    if state.focus == Focus::Command {
        let cmd_area = Rect { height: 1, ..vert[2] };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    } else {
        frame.render_widget(StatusLine::new(state.status.as_ref(), &state.theme), vert[2]);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
