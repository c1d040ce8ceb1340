//! TUI rendering and terminal management (impure shell).
//!
//! The shell owns the terminal, the browser-style history and the
//! per-view selection. It turns key presses and transport completions into
//! engine events and carries out the effects the engine returns.

pub mod constants;
pub mod layout;
pub mod refresh_indicator;
pub mod selection;
pub mod styles;

pub use layout::{render_layout, Screen};
pub use refresh_indicator::RefreshIndicator;
pub use selection::{Cursor, Selections};
pub use styles::{ColorConfig, FeedStyles};

use crate::config::KeyBindings;
use crate::model::{ItemId, KeyAction, ViewKey, ViewKind};
use crate::state::{handle_event, Effect, EngineState, Event, History, HistoryEntry};
use crate::transport::Dispatcher;
use crossterm::{
    event::{self, Event as TermEvent, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Shell settings that do not belong to the engine.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Emit `RefreshRequested` this often; `None` disables the timer.
    pub refresh_interval: Option<Duration>,
    /// Key map.
    pub key_bindings: KeyBindings,
    /// Styles to draw with.
    pub styles: FeedStyles,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    engine: EngineState,
    history: History,
    dispatcher: Dispatcher,
    events: Receiver<Event>,
    selections: Selections,
    notice: Option<String>,
    options: ShellOptions,
    last_refresh: Instant,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the shell around a seeded engine.
    ///
    /// The visible view is installed as the first history entry with
    /// replace semantics; nothing is fetched until [`TuiApp::boot`].
    pub fn with_terminal(
        terminal: Terminal<B>,
        engine: EngineState,
        dispatcher: Dispatcher,
        events: Receiver<Event>,
        options: ShellOptions,
    ) -> Self {
        let history = History::new(HistoryEntry::for_key(engine.visible_key().clone()));
        Self {
            terminal,
            engine,
            history,
            dispatcher,
            events,
            selections: Selections::new(),
            notice: None,
            options,
            last_refresh: Instant::now(),
        }
    }

    /// Bind the seeded view or start loading it.
    pub fn boot(&mut self) {
        self.dispatch(Event::Boot);
        let key = self.engine.visible_key().clone();
        self.selections
            .cursor_mut(&key)
            .select_first(self.engine.fragment());
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws only after input,
    /// a completed request or a timer refresh.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let tick = Duration::from_millis(constants::TICK_INTERVAL_MS);
        self.boot();
        self.draw()?;

        loop {
            let mut dirty = self.drain_events();

            if self.refresh_due() {
                debug!("Timer refresh");
                self.last_refresh = Instant::now();
                self.dispatch(Event::RefreshRequested);
                dirty = true;
            }

            if event::poll(tick)? {
                match event::read()? {
                    TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    TermEvent::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    fn refresh_due(&self) -> bool {
        self.options
            .refresh_interval
            .is_some_and(|interval| self.last_refresh.elapsed() >= interval)
    }

    /// Feed every completion that arrived since the last turn to the engine.
    ///
    /// Returns true if anything was processed.
    fn drain_events(&mut self) -> bool {
        let mut processed = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    processed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    /// Hand one event to the engine and carry out its effects.
    fn dispatch(&mut self, event: Event) {
        let effects = handle_event(&mut self.engine, event);
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchView { request, args } => self.dispatcher.fetch(request, args),
            Effect::SubmitAction(submission) => self.dispatcher.submit(submission),
            Effect::PushHistory(entry) => self.history.push(entry),
            Effect::ScrollToTop => {
                let key = self.engine.visible_key().clone();
                self.selections
                    .cursor_mut(&key)
                    .select_first(self.engine.fragment());
            }
            Effect::ScrollToItem(id) => {
                let key = self.engine.visible_key().clone();
                self.selections.cursor_mut(&key).select(id);
            }
            Effect::OpenComposer { reply_to, mention } => {
                info!(%reply_to, "Composer requested");
                self.notice = Some(match mention {
                    Some(who) => format!("reply to {} ({})", reply_to, who),
                    None => format!("reply to {}", reply_to),
                });
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let action = match self.options.key_bindings.get(key) {
            Some(action) => action,
            None => return false,
        };
        self.notice = None;

        let view = self.engine.visible_key().clone();
        match action {
            KeyAction::Quit => return true,

            KeyAction::OpenView(kind) => self.dispatch(Event::Navigate {
                key: ViewKey::of(kind),
                url: None,
                anchor: None,
            }),

            KeyAction::Refresh => {
                self.last_refresh = Instant::now();
                self.dispatch(Event::RefreshRequested);
            }
            KeyAction::JumpToOldestNew => self.dispatch(Event::JumpToOldestNew),

            KeyAction::NextItem => self
                .selections
                .cursor_mut(&view)
                .next_item(self.engine.fragment()),
            KeyAction::PrevItem => self
                .selections
                .cursor_mut(&view)
                .prev_item(self.engine.fragment()),
            KeyAction::ScrollToTop => self
                .selections
                .cursor_mut(&view)
                .select_first(self.engine.fragment()),
            KeyAction::NextControl => self
                .selections
                .cursor_mut(&view)
                .next_control(self.engine.fragment()),

            KeyAction::ActivateControl => {
                if let Some(item) = self.selected_item_id() {
                    let control = self.selections.cursor_mut(&view).control();
                    self.dispatch(Event::ActivateControl { item, control });
                }
            }

            KeyAction::OpenConversation => self.open_conversation(),
            KeyAction::OpenAuthor => {
                self.follow_link_of_kind(ViewKind::Honker);
            }
            KeyAction::OpenCombo => {
                self.follow_link_of_kind(ViewKind::Combo);
            }

            KeyAction::Back => match self.history.back() {
                Some(entry) => self.dispatch(Event::HistoryPop(entry)),
                None => self.notice = Some("at start of history".to_string()),
            },
            KeyAction::Forward => match self.history.forward() {
                Some(entry) => self.dispatch(Event::HistoryPop(entry)),
                None => self.notice = Some("at end of history".to_string()),
            },
        }
        false
    }

    fn selected_item_id(&self) -> Option<ItemId> {
        self.selections
            .get(self.engine.visible_key())
            .and_then(|cursor| cursor.selected(self.engine.fragment()))
            .map(|item| item.id.clone())
    }

    /// Follow the selected item's first link to a view of `kind`.
    ///
    /// Returns false if the item has no such link.
    fn follow_link_of_kind(&mut self, kind: ViewKind) -> bool {
        let Some(item_id) = self.selected_item_id() else {
            return false;
        };
        let link = self.engine.fragment().get(&item_id).and_then(|item| {
            item.links
                .iter()
                .position(|link| link.target.kind == kind)
        });
        match link {
            Some(link) => {
                self.dispatch(Event::FollowLink {
                    item: item_id,
                    link,
                });
                true
            }
            None => false,
        }
    }

    /// Open the selected item's conversation, by link or by its convoy id.
    fn open_conversation(&mut self) {
        if self.follow_link_of_kind(ViewKind::Conversation) {
            return;
        }
        let convoy = self
            .selected_item_id()
            .and_then(|id| self.engine.fragment().get(&id))
            .and_then(|item| item.convoy.clone());
        if let Some(convoy) = convoy {
            self.dispatch(Event::Navigate {
                key: ViewKey::conversation(convoy),
                url: None,
                anchor: None,
            });
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let screen = Screen {
            engine: &self.engine,
            cursor: self.selections.get(self.engine.visible_key()),
            notice: self.notice.as_deref(),
            styles: &self.options.styles,
        };
        self.terminal.draw(|frame| render_layout(frame, &screen))?;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    pub(crate) fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn cursor(&self) -> Option<&Cursor> {
        self.selections.get(self.engine.visible_key())
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn apply_effect_test(&mut self, effect: Effect) {
        self.apply_effect(effect)
    }

    /// Wait for one transport completion and process it.
    pub(crate) fn pump_one(&mut self, timeout: Duration) -> bool {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize the terminal and run the application until the user quits.
///
/// The terminal is restored even if the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    engine: EngineState,
    dispatcher: Dispatcher,
    events: Receiver<Event>,
    options: ShellOptions,
) -> Result<(), TuiError> {
    let terminal = setup_terminal()?;
    let mut app = TuiApp::with_terminal(terminal, engine, dispatcher, events, options);

    let result = app.run();

    restore_terminal()?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
