//! The text command console for Easel.
//!
//! This module is the command-line execution engine: it turns a continuous
//! stream of free-text keystrokes, shortcut firings, and programmatic
//! submissions into discrete command invocations, one per UI tick, while
//! coordinating with modal dialogs that suspend command processing.
//!
//! The pieces, leaves first: [`extract`] pulls one token at a time out of an
//! accumulating buffer; [`registry`] maps names to handlers; [`history`]
//! keeps submitted lines browsable; [`shortcut`] turns held key chords into
//! submissions; and [`coordinator`] is the state machine tying them together.

pub mod coordinator;
pub mod extract;
pub mod history;
pub mod registry;
pub mod shortcut;

pub use coordinator::{ExecutionCoordinator, ModalHandle, PumpSource};
pub use extract::{next_token, Extraction};
pub use history::HistoryLog;
pub use registry::{CommandHandler, CommandRegistry};
pub use shortcut::{KeyChord, KeyboardState, ShortcutDispatcher, REPEAT_THRESHOLD};
