//! Event handling for the TUI.
//!
//! Processes keyboard and terminal events using crossterm. The poll timeout
//! doubles as the console tick: when no event arrives within it, the loop
//! still gets a `Tick` so the coordinator and shortcut dispatcher run.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use easel::error::{EaselError, Result};
use std::time::Duration;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed, repeated, or released.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A periodic tick.
    Tick,
}

/// Handles terminal events.
pub struct EventHandler {
    /// Timeout for polling events; also the tick rate.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)
            .map_err(|e| EaselError::terminal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| EaselError::terminal(format!("Failed to read event: {e}")))?;

            match event {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_stores_tick_rate() {
        let handler = EventHandler::new(Duration::from_millis(50));
        assert_eq!(handler.tick_rate, Duration::from_millis(50));
    }
}
