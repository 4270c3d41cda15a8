//! Terminal user interface for Easel.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
mod ui;

pub use app::App;
pub use events::{Event, EventHandler};

use std::io::{self, Stdout};
use std::panic;
use std::time::Instant;

use crossterm::{
    event::{
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use easel::config::Config;
use easel::error::{EaselError, Result};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new(config: &Config) -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let event_handler = EventHandler::new(config.tick_rate());
        Ok(Self {
            terminal,
            event_handler,
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| EaselError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| EaselError::terminal(format!("Failed to enter alternate screen: {e}")))?;

        // Key-release events make shortcut hold detection exact; terminals
        // without the enhancement still work, keys just read as taps.
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| EaselError::terminal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);

        disable_raw_mode()
            .map_err(|e| EaselError::terminal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| EaselError::terminal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| EaselError::terminal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop.
    pub fn run(&mut self, app: &mut App) -> Result<()> {
        // Restore the terminal if anything below panics.
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let started = Instant::now();

        while app.running {
            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| EaselError::terminal(format!("Failed to draw: {e}")))?;

            match self.event_handler.next()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) | Event::Tick => {}
            }

            app.on_tick(started.elapsed());
        }

        let _ = panic::take_hook();
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application.
pub fn run(config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let mut tui = Tui::new(config)?;
    tui.run(&mut app)
}
