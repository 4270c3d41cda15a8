//! Application state for the Easel console host.
//!
//! `App` wires the console engine to its collaborators: the input bar (text
//! surface), the quit-confirmation dialog (modal owner), the keyboard
//! snapshot feeding the shortcut dispatcher, and the placeholder drawing
//! commands. Handlers never touch `App` directly — they enqueue actions on a
//! shared queue that the tick drains, so the registry borrow stays clean.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use easel::config::Config;
use easel::console::{
    CommandRegistry, ExecutionCoordinator, HistoryLog, KeyChord, KeyboardState, ModalHandle,
    PumpSource, ShortcutDispatcher,
};

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The command input bar.
    #[default]
    Input,
    /// The transcript pane (shortcut chords are scanned here).
    Transcript,
}

impl Focus {
    /// Cycles to the next focus panel.
    pub fn next(self) -> Self {
        match self {
            Self::Input => Self::Transcript,
            Self::Transcript => Self::Input,
        }
    }
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// A command-log line ("Command: …").
    Command(String),
    /// Informational output from a handler.
    Info(String),
    /// An error line (unknown command, etc.).
    Error(String),
}

impl TranscriptLine {
    /// Returns the line text.
    pub fn text(&self) -> &str {
        match self {
            Self::Command(s) | Self::Info(s) | Self::Error(s) => s,
        }
    }
}

/// Placeholder document state for the drawing prototype.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    /// The last selected drawing tool.
    pub current_tool: Option<&'static str>,
    /// Number of placed shapes.
    pub shape_count: u32,
    /// True when there are unsaved changes.
    pub dirty: bool,
    /// Whether the properties panel is open.
    pub properties_open: bool,
}

/// Actions enqueued by command handlers and drained once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    NewDocument,
    OpenDocument,
    Save { as_copy: bool },
    PlaceShape(&'static str),
    Undo,
    Redo,
    SetProperties(bool),
    ClearTranscript,
    Help,
    RequestQuit,
}

type ActionQueue = Rc<RefCell<VecDeque<AppAction>>>;

/// The console host application.
pub struct App {
    /// False once the user has quit.
    pub running: bool,
    /// Current focus panel.
    pub focus: Focus,
    /// Live input bar content.
    pub input: String,
    /// Rendered console transcript.
    pub transcript: Vec<TranscriptLine>,
    /// Transcript scroll offset from the bottom.
    pub scroll: usize,
    /// Placeholder drawing-document state.
    pub document: DocumentState,
    registry: CommandRegistry,
    coordinator: ExecutionCoordinator,
    shortcuts: ShortcutDispatcher,
    keyboard: KeyboardState,
    actions: ActionQueue,
    quit_modal: Option<ModalHandle>,
}

impl App {
    /// Creates the application state from configuration.
    pub fn new(config: &Config) -> Self {
        let mut coordinator = ExecutionCoordinator::with_history(HistoryLog::with_capacity(
            config.console.history_limit,
        ));
        let quit_modal = coordinator.register_modal("confirm-quit");

        let actions: ActionQueue = Rc::new(RefCell::new(VecDeque::new()));
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry, &actions);

        let mut shortcuts = ShortcutDispatcher::new();
        for (chord, command) in config.shortcut_bindings() {
            match KeyChord::parse(&chord) {
                Ok(parsed) => {
                    shortcuts.register(parsed, &command);
                }
                Err(e) => warn!(chord = %chord, "ignoring shortcut binding: {e}"),
            }
        }

        Self {
            running: true,
            focus: Focus::default(),
            input: String::new(),
            transcript: Vec::new(),
            scroll: 0,
            document: DocumentState::default(),
            registry,
            coordinator,
            shortcuts,
            keyboard: KeyboardState::new(),
            actions,
            quit_modal,
        }
    }

    /// Returns true while the quit-confirmation dialog is open.
    pub fn quit_dialog_open(&self) -> bool {
        self.quit_modal
            .as_ref()
            .map(ModalHandle::is_visible)
            .unwrap_or(false)
    }

    /// Returns the unprocessed console input held between ticks.
    pub fn pending_input(&self) -> &str {
        self.coordinator.buffer()
    }

    /// Returns true while the console is suspended (modal open).
    pub fn executing(&self) -> bool {
        self.coordinator.is_executing()
    }

    /// Submits one line through the console pipeline, as the input bar does.
    pub fn submit_line(&mut self, line: &str) {
        self.coordinator.append_input(line);
        self.coordinator
            .pump(&mut self.registry, PumpSource::Submission);
    }

    /// Handles a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always exits, dialog or not.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        // The quit dialog swallows all other keys while open.
        if self.quit_dialog_open() {
            if key.kind == KeyEventKind::Press {
                self.handle_quit_dialog_key(key.code);
            }
            return;
        }

        if key.code == KeyCode::Tab && key.kind == KeyEventKind::Press {
            self.focus = self.focus.next();
            // Held keys do not carry across a focus change.
            self.keyboard.release_all();
            return;
        }

        match self.focus {
            Focus::Input => {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    self.handle_input_key(key);
                }
            }
            Focus::Transcript => self.handle_transcript_key(key),
        }
    }

    fn handle_quit_dialog_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.running = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                if let Some(modal) = &self.quit_modal {
                    modal.set_visible(false);
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            // Modified characters are not text.
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.submit_line(&line);
            }
            KeyCode::Up => {
                if let Some(text) = self.coordinator.history_mut().browse_previous() {
                    self.input = text.to_string();
                }
            }
            KeyCode::Down => {
                if let Some(text) = self.coordinator.history_mut().browse_next() {
                    self.input = text.to_string();
                }
            }
            _ => {}
        }
    }

    fn handle_transcript_key(&mut self, key: KeyEvent) {
        // Scroll keys first; everything else feeds the shortcut snapshot.
        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Up => {
                    self.scroll = self.scroll.saturating_add(1);
                    return;
                }
                KeyCode::Down => {
                    self.scroll = self.scroll.saturating_sub(1);
                    return;
                }
                _ => {}
            }
        }

        self.keyboard.set_modifiers(key.modifiers);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.keyboard.key_down(key.code),
            KeyEventKind::Release => self.keyboard.key_up(key.code),
        }
    }

    /// Runs one console tick: modal maintenance, pump, shortcut scan, and
    /// draining of the command log and action queue.
    pub fn on_tick(&mut self, now: Duration) {
        self.coordinator.maintain_modal_state();
        self.coordinator.pump(&mut self.registry, PumpSource::Tick);

        // The input bar consumes keys while focused; the dispatcher only
        // scans when it does not want them.
        if self.focus != Focus::Input {
            if let Some(line) = self.shortcuts.scan(&self.keyboard, now) {
                let line = line.to_string();
                self.coordinator.submit(&line);
            }
        }

        self.drain_console_log();
        self.drain_actions();
    }

    fn drain_console_log(&mut self) {
        for line in self.coordinator.drain_log() {
            if line.starts_with("Unknown command") {
                self.transcript.push(TranscriptLine::Error(line));
            } else {
                self.transcript.push(TranscriptLine::Command(line));
            }
        }
    }

    fn drain_actions(&mut self) {
        let drained: Vec<AppAction> = self.actions.borrow_mut().drain(..).collect();
        for action in drained {
            self.apply_action(action);
        }
    }

    fn apply_action(&mut self, action: AppAction) {
        match action {
            AppAction::NewDocument => {
                self.document = DocumentState::default();
                self.info("new document");
            }
            AppAction::OpenDocument => {
                // todo: wire to a file picker once documents persist
                self.info("open: no document storage yet");
            }
            AppAction::Save { as_copy } => {
                self.document.dirty = false;
                if as_copy {
                    self.info("saved a copy");
                } else {
                    self.info("saved");
                }
            }
            AppAction::PlaceShape(tool) => {
                self.document.current_tool = Some(tool);
                self.document.shape_count += 1;
                self.document.dirty = true;
                self.info(format!("placed {tool} #{}", self.document.shape_count));
            }
            AppAction::Undo => {
                if self.document.shape_count > 0 {
                    self.document.shape_count -= 1;
                    self.document.dirty = true;
                    self.info("removed last shape");
                } else {
                    self.info("nothing to undo");
                }
            }
            AppAction::Redo => {
                self.info("redo: nothing recorded yet");
            }
            AppAction::SetProperties(open) => {
                self.document.properties_open = open;
                self.info(if open {
                    "properties panel opened"
                } else {
                    "properties panel closed"
                });
            }
            AppAction::ClearTranscript => {
                self.transcript.clear();
                self.scroll = 0;
            }
            AppAction::Help => {
                let names = self
                    .registry
                    .names()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                self.info(format!("commands: {}", names.join(", ")));
                self.info("Tab switches focus; shortcuts fire in the transcript pane");
            }
            AppAction::RequestQuit => match &self.quit_modal {
                Some(modal) if self.document.dirty => modal.set_visible(true),
                _ => self.running = false,
            },
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptLine::Info(text.into()));
    }
}

/// Registers the prototype's built-in drawing commands.
///
/// Several names share one handler and differ only in the category it is
/// invoked with: `save`/`saveas`, the shape tools, and the properties pair.
fn register_builtin_commands(registry: &mut CommandRegistry, actions: &ActionQueue) {
    let enqueue = |actions: &ActionQueue, action: AppAction| {
        let actions = Rc::clone(actions);
        Box::new(move |_: i32| actions.borrow_mut().push_back(action.clone()))
    };

    registry.register("new", 0, enqueue(actions, AppAction::NewDocument));
    registry.register("open", 0, enqueue(actions, AppAction::OpenDocument));
    registry.register("undo", 0, enqueue(actions, AppAction::Undo));
    registry.register("redo", 0, enqueue(actions, AppAction::Redo));
    registry.register("clear", 0, enqueue(actions, AppAction::ClearTranscript));
    registry.register("help", 0, enqueue(actions, AppAction::Help));
    registry.register("quit", 0, enqueue(actions, AppAction::RequestQuit));
    registry.register("exit", 0, enqueue(actions, AppAction::RequestQuit));

    registry.register("save", 0, file_handler(actions));
    registry.register("saveas", 1, file_handler(actions));

    registry.register("line", 0, shape_handler(actions));
    registry.register("rect", 1, shape_handler(actions));
    registry.register("circle", 2, shape_handler(actions));

    registry.register("showprops", 1, properties_handler(actions));
    registry.register("hideprops", 0, properties_handler(actions));
}

/// One handler for `save` (category 0) and `saveas` (category 1).
fn file_handler(actions: &ActionQueue) -> Box<dyn FnMut(i32)> {
    let actions = Rc::clone(actions);
    Box::new(move |category| {
        actions.borrow_mut().push_back(AppAction::Save {
            as_copy: category == 1,
        });
    })
}

/// One handler for the shape tools; the category selects the shape.
fn shape_handler(actions: &ActionQueue) -> Box<dyn FnMut(i32)> {
    let actions = Rc::clone(actions);
    Box::new(move |category| {
        let tool = match category {
            0 => "line",
            1 => "rect",
            _ => "circle",
        };
        actions.borrow_mut().push_back(AppAction::PlaceShape(tool));
    })
}

/// One handler for `showprops` (category 1) and `hideprops` (category 0).
fn properties_handler(actions: &ActionQueue) -> Box<dyn FnMut(i32)> {
    let actions = Rc::clone(actions);
    Box::new(move |category| {
        actions
            .borrow_mut()
            .push_back(AppAction::SetProperties(category != 0));
    })
}
