//! Command registration and dispatch.
//!
//! Maps lower-cased command names to handlers. A handler is a stored function
//! value invoked with the integer category it was registered with; the
//! category lets one handler serve several names (e.g. `showprops` and
//! `hideprops` sharing a properties handler with categories 1 and 0).
//!
//! All failure paths here are "log a diagnostic and continue": duplicate
//! registration is rejected without touching the existing entry, and
//! unregistering an unknown name is a no-op. Both `register` and `unregister`
//! lower-case the name, so call sites never have to agree on a case.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

/// A registered command handler, invoked with its category.
pub type CommandHandler = Box<dyn FnMut(i32)>;

struct RegisteredCommand {
    category: i32,
    handler: CommandHandler,
}

/// Registry of named commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under the lower-cased `name`.
    ///
    /// Returns false (and logs a diagnostic) if the name is already taken —
    /// the prior registration stands, even when handler and category are
    /// identical.
    pub fn register(&mut self, name: &str, category: i32, handler: CommandHandler) -> bool {
        let key = name.to_lowercase();
        if self.commands.contains_key(&key) {
            warn!(command = %key, "duplicate command registration rejected");
            return false;
        }
        self.commands
            .insert(key, RegisteredCommand { category, handler });
        true
    }

    /// Removes the registration for `name` (lower-cased before lookup).
    ///
    /// Returns false (and logs a diagnostic) if no such command exists.
    pub fn unregister(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        if self.commands.remove(&key).is_none() {
            warn!(command = %key, "unregister of unknown command ignored");
            return false;
        }
        true
    }

    /// Returns true if `name` (lower-cased) is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    /// Invokes the handler registered for `name` with its stored category.
    ///
    /// Returns false if the name is unknown. Reporting the unknown token is
    /// the caller's job: at dispatch time that goes to the command log, not
    /// the diagnostics sink.
    pub fn dispatch(&mut self, name: &str) -> bool {
        match self.commands.get_mut(&name.to_lowercase()) {
            Some(command) => {
                (command.handler)(command.category);
                true
            }
            None => false,
        }
    }

    /// Returns the registered names, sorted, for help output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
