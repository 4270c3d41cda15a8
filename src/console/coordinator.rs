//! The console execution state machine.
//!
//! [`ExecutionCoordinator`] owns the per-document unprocessed-input buffer,
//! the executing flag, the history log, and the modal-visibility
//! subscriptions. Raw text flows in from three sources — the input bar,
//! fired shortcuts, and programmatic callers — and is consumed one token per
//! tick, so the pipeline survives being re-entered every frame without
//! losing or double-executing input.
//!
//! While a command is executing (in practice: while any registered modal is
//! visible) the pump does nothing and the buffer keeps accumulating; the
//! backlog is processed once the coordinator returns to idle.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use tracing::warn;

use super::extract::next_token;
use super::history::HistoryLog;
use super::registry::CommandRegistry;

/// What triggered a call to [`ExecutionCoordinator::pump`].
///
/// An empty extraction is a no-op on a tick pump, but on a submission pump it
/// means the user pressed Enter on an empty line, which re-runs the most
/// recent history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpSource {
    /// The regular per-tick pump.
    Tick,
    /// A direct text-box submission.
    Submission,
}

/// A modal dialog's visibility subscription.
///
/// The owning dialog keeps the handle and flips [`set_visible`] as it opens
/// and closes; the coordinator only ever reads the flag. Dropping the handle
/// unregisters the observation — there is no way to leave a dangling
/// reference behind.
///
/// [`set_visible`]: ModalHandle::set_visible
#[derive(Debug, Clone)]
pub struct ModalHandle {
    name: String,
    visible: Rc<Cell<bool>>,
}

impl ModalHandle {
    /// Updates the dialog's visibility flag.
    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Returns the current visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Returns the name the dialog registered under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct ModalWatcher {
    name: String,
    visible: Weak<Cell<bool>>,
}

/// Per-document command execution state machine.
pub struct ExecutionCoordinator {
    /// Not-yet-tokenized input.
    buffer: String,
    /// True while a command is mid-flight or a modal session is active.
    executing: bool,
    /// Raw text of the most recent submission, consumed by the next
    /// successful extraction to become the history entry.
    pending_raw: Option<String>,
    history: HistoryLog,
    /// Command log lines ("Command: …", "Unknown command: …"), drained by
    /// the host each tick.
    log: Vec<String>,
    modals: Vec<ModalWatcher>,
    /// Whether any modal was visible on the previous maintenance tick.
    modal_was_visible: bool,
    /// The executing flag as it was before the current modal session began.
    executing_before_modal: bool,
}

impl Default for ExecutionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionCoordinator {
    /// Creates an idle coordinator with default history capacity.
    pub fn new() -> Self {
        Self::with_history(HistoryLog::new())
    }

    /// Creates an idle coordinator with the given history log.
    pub fn with_history(history: HistoryLog) -> Self {
        Self {
            buffer: String::new(),
            executing: false,
            pending_raw: None,
            history,
            log: Vec::new(),
            modals: Vec::new(),
            modal_was_visible: false,
            executing_before_modal: false,
        }
    }

    /// Appends a line submitted from the text surface.
    ///
    /// The terminating Enter keystroke becomes a newline separator in the
    /// buffer, so consecutive submissions never run together. Call
    /// [`pump`](Self::pump) with [`PumpSource::Submission`] afterwards.
    pub fn append_input(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            self.pending_raw = Some(trimmed.to_string());
        }
    }

    /// Submits a command line programmatically (shortcuts, callers).
    ///
    /// If a command is currently executing it is cancelled first. The text is
    /// prefixed with a separating space so consecutive programmatic
    /// submissions never run together.
    pub fn submit(&mut self, text: &str) {
        if self.executing {
            self.cancel();
        }
        self.buffer.push(' ');
        self.buffer.push_str(text);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.pending_raw = Some(trimmed.to_string());
        }
    }

    /// Processes at most one command from the buffer.
    ///
    /// Does nothing while executing: the buffer keeps accumulating and is
    /// drained once the coordinator is idle again. An extraction always
    /// removes exactly the consumed prefix from the buffer, including its
    /// terminating separator.
    pub fn pump(&mut self, registry: &mut CommandRegistry, source: PumpSource) {
        if self.executing {
            return;
        }

        let extraction = next_token(&self.buffer);
        let token = extraction.token;
        let remainder = extraction.remainder.to_string();
        self.buffer = remainder;

        if token.is_empty() {
            if source == PumpSource::Submission {
                self.replay_latest(registry);
            }
            return;
        }

        let raw = self.pending_raw.take().unwrap_or_else(|| token.clone());
        self.history.push(raw);
        self.dispatch(registry, &token);
    }

    /// Re-runs the most recent history entry without altering history.
    fn replay_latest(&mut self, registry: &mut CommandRegistry) {
        let token = match self.history.latest() {
            Some(entry) => next_token(entry).token,
            None => {
                self.log.push("Command:".to_string());
                return;
            }
        };
        self.dispatch(registry, &token);
    }

    fn dispatch(&mut self, registry: &mut CommandRegistry, token: &str) {
        self.log.push(format!("Command: {token}"));
        if !registry.dispatch(token) {
            self.log.push(format!("Unknown command: {token}"));
        }
    }

    /// Cancels whatever is in flight and returns to idle.
    ///
    /// This is an immediate, terminating transition: the executing flag is
    /// cleared along with the unprocessed input.
    pub fn cancel(&mut self) {
        self.executing = false;
        self.buffer.clear();
        self.pending_raw = None;
    }

    /// Registers a modal dialog's visibility observation.
    ///
    /// Returns `None` (and logs a diagnostic) if the name is already taken by
    /// a live subscription. The returned handle starts out not visible;
    /// dropping it unregisters the observation.
    pub fn register_modal(&mut self, name: &str) -> Option<ModalHandle> {
        self.prune_modals();
        if self.modals.iter().any(|m| m.name == name) {
            warn!(modal = %name, "duplicate modal registration rejected");
            return None;
        }
        let visible = Rc::new(Cell::new(false));
        self.modals.push(ModalWatcher {
            name: name.to_string(),
            visible: Rc::downgrade(&visible),
        });
        Some(ModalHandle {
            name: name.to_string(),
            visible,
        })
    }

    /// Tracks modal visibility; call once per tick, independent of `pump`.
    ///
    /// On the tick any modal becomes visible the coordinator is forced into
    /// the executing state and the prior flag value is remembered; when the
    /// last modal disappears the remembered value is restored. While no
    /// modal is visible the memo tracks the live flag, so a later modal
    /// session restores the most recent pre-modal state.
    pub fn maintain_modal_state(&mut self) {
        self.prune_modals();
        let any_visible = self
            .modals
            .iter()
            .filter_map(|m| m.visible.upgrade())
            .any(|flag| flag.get());

        if any_visible {
            if !self.modal_was_visible {
                self.executing_before_modal = self.executing;
            }
            self.executing = true;
        } else if self.modal_was_visible {
            self.executing = self.executing_before_modal;
        } else {
            self.executing_before_modal = self.executing;
        }

        self.modal_was_visible = any_visible;
    }

    fn prune_modals(&mut self) {
        self.modals.retain(|m| m.visible.strong_count() > 0);
    }

    /// Returns true while a command is mid-flight or a modal is open.
    pub fn is_executing(&self) -> bool {
        self.executing
    }

    /// Returns the unprocessed input, for the text surface to render.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns the history log.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Returns the history log for browsing.
    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// Returns the names of live modal subscriptions.
    pub fn modal_names(&self) -> Vec<&str> {
        self.modals
            .iter()
            .filter(|m| m.visible.strong_count() > 0)
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Takes the accumulated command log lines.
    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}
