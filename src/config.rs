//! Configuration management for Easel.
//!
//! Handles loading configuration from TOML files: console tuning (tick rate,
//! history capacity) and the shortcut table mapping chord strings to command
//! lines. A missing config file is not an error — everything has a default.

use crate::error::{EaselError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for Easel.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Console tuning.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Shortcut chords mapped to command lines, e.g. `"ctrl+n" = "new"`.
    /// An empty table falls back to the built-in bindings.
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

/// Console tuning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Maximum number of retained history entries.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_history_limit() -> usize {
    100
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            history_limit: default_history_limit(),
        }
    }
}

/// Built-in shortcut bindings used when the config names none.
fn builtin_shortcuts() -> HashMap<String, String> {
    [
        ("ctrl+n", "new"),
        ("ctrl+o", "open"),
        ("ctrl+s", "save"),
        ("ctrl+shift+s", "saveas"),
        ("ctrl+z", "undo"),
        ("ctrl+y", "redo"),
        ("ctrl+l", "line"),
        ("ctrl+r", "rect"),
        ("ctrl+e", "circle"),
        ("ctrl+p", "showprops"),
    ]
    .into_iter()
    .map(|(chord, command)| (chord.to_string(), command.to_string()))
    .collect()
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| EaselError::config(format!("Cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| EaselError::config(format!("Invalid config {}: {e}", path.display())))
    }

    /// Returns the default config file path.
    ///
    /// `~/.config/easel/config.toml` on Linux, or the platform-appropriate
    /// config directory elsewhere.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("easel").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("easel.toml"))
    }

    /// Returns the effective shortcut table: the configured one, or the
    /// built-in bindings when the config names none.
    pub fn shortcut_bindings(&self) -> HashMap<String, String> {
        if self.shortcuts.is_empty() {
            builtin_shortcuts()
        } else {
            self.shortcuts.clone()
        }
    }

    /// Returns the tick rate as a duration.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.console.tick_rate_ms)
    }
}
