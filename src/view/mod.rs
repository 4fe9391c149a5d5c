//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod layout;
pub mod live_indicator;
pub mod log_row;
pub mod styles;

pub use live_indicator::LiveIndicator;
pub use styles::{ColorConfig, RowStyles};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::ingest::{Delivery, IngestHandle};
use crate::model::KeyAction;
use crate::source::Source;
use crate::state::{AppState, IngestStatus};
use constants::{chrome_height, TICK_INTERVAL_MS, WHEEL_SCROLL_LINES};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    ingest: Option<IngestHandle>,
    source_label: String,
    key_bindings: KeyBindings,
    styles: RowStyles,
    blink_on: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and starts ingesting
    /// `source` in the background.
    pub fn new(source: Source, config: &ResolvedConfig) -> Result<Self, TuiError> {
        let ingest = IngestHandle::spawn(config.ingest_settings(source.clone()))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let app_state = AppState::new(config.default_item_height, config.placeholder_count);

        Ok(Self::with_parts(
            terminal,
            app_state,
            Some(ingest),
            source.to_string(),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Every iteration drains pending
    /// deliveries; keys, mouse and resize events redraw immediately.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const TICK: Duration = Duration::from_millis(TICK_INTERVAL_MS);

        self.draw()?;

        loop {
            let input = if event::poll(TICK)? {
                Some(event::read()?)
            } else {
                None
            };
            if self.step(input)? {
                return Ok(());
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_parts(
        terminal: Terminal<B>,
        app_state: AppState,
        ingest: Option<IngestHandle>,
        source_label: String,
    ) -> Self {
        Self {
            terminal,
            app_state,
            ingest,
            source_label,
            key_bindings: KeyBindings::default(),
            styles: RowStyles::default(),
            blink_on: true,
        }
    }

    /// Apply everything the ingest thread has delivered since the last call.
    ///
    /// Returns true if the state changed.
    /// One loop iteration: an input event, or `None` when the tick elapsed.
    ///
    /// Ingest is polled on every iteration so steady input cannot hold back
    /// deliveries. Returns `true` when the user quits.
    fn step(&mut self, input: Option<Event>) -> Result<bool, TuiError> {
        let mut redraw = match input {
            Some(Event::Key(key)) => {
                if self.handle_key(key) {
                    return Ok(true);
                }
                true
            }
            Some(Event::Mouse(mouse)) => {
                self.handle_mouse(mouse);
                true
            }
            Some(Event::Resize(width, height)) => {
                debug!("Handling resize to {}x{}", width, height);
                true
            }
            Some(_) => false,
            None => {
                let streaming = self.app_state.status == IngestStatus::Streaming;
                if streaming {
                    self.blink_on = !self.blink_on;
                }
                streaming
            }
        };

        redraw |= self.poll_ingest();
        if redraw {
            self.draw()?;
        }
        Ok(false)
    }

    fn poll_ingest(&mut self) -> bool {
        let Some(ingest) = self.ingest.as_mut() else {
            return false;
        };

        let mut deliveries = ingest.try_deliveries();
        let finished = ingest.report().is_some();
        if finished {
            // Anything queued before the thread exited
            deliveries.extend(ingest.try_deliveries());
        }

        let mut changed = !deliveries.is_empty();
        for delivery in deliveries {
            self.apply_delivery(delivery);
        }

        if finished {
            if let Some(report) = self.ingest.take().and_then(IngestHandle::shutdown) {
                info!(
                    delivered = report.delivered(),
                    malformed = report.malformed,
                    "Ingest finished"
                );
                self.app_state.finish(&report);
            }
            changed = true;
        }

        changed
    }

    fn apply_delivery(&mut self, delivery: Delivery) {
        let appended = self.app_state.apply(delivery);
        debug!(
            appended,
            total = self.app_state.records().len(),
            "Applied delivery"
        );
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::SelectNext => self.app_state.select_next(),
            KeyAction::SelectPrev => self.app_state.select_prev(),
            KeyAction::PageDown => self.app_state.page_down(),
            KeyAction::PageUp => self.app_state.page_up(),
            KeyAction::SelectFirst => self.app_state.select_first(),
            KeyAction::SelectLast => self.app_state.select_last(),
            KeyAction::ToggleExpand => self.app_state.toggle_expand(),
        }

        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.app_state.scroll_by(WHEEL_SCROLL_LINES);
            }
            MouseEventKind::ScrollUp => {
                self.app_state.scroll_by(-WHEEL_SCROLL_LINES);
            }
            _ => {}
        }
    }

    /// Render the current frame
    ///
    /// Measures the list viewport first so the window is computed for the
    /// size actually drawn.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let list_height = size.height.saturating_sub(chrome_height());
        self.app_state.set_viewport_height(u32::from(list_height));

        let state = &self.app_state;
        let source = self.source_label.as_str();
        let styles = &self.styles;
        let blink_on = self.blink_on;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, source, styles, blink_on);
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application for `source`.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
/// Logging must be initialized by the caller.
pub fn run(source: Source, config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, config)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    if let Some(ingest) = app.ingest.take() {
        if let Some(report) = ingest.shutdown() {
            info!(
                delivered = report.delivered(),
                malformed = report.malformed,
                "Ingest stopped"
            );
        }
    }

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
