//! Logging setup for Easel.
//!
//! `tracing` is the diagnostics sink for the whole application: the console
//! engine reports every rejected registration and unknown unregister through
//! it. TUI sessions write to a log file under the platform state directory so
//! the terminal display stays clean; headless sessions write to stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Directory the log file lives in.
///
/// Prefers the XDG state directory (`~/.local/state/easel` on Linux), then
/// the platform config directory, then the temp directory.
fn log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("easel"))
        .unwrap_or_else(std::env::temp_dir)
}

/// Full path of the session log file.
pub fn log_path() -> PathBuf {
    log_dir().join("easel.log")
}

/// Routes diagnostics to a file for TUI sessions.
///
/// The file is truncated on each run. If it cannot be created, the session
/// runs without logging; a one-line warning on stderr before raw mode is
/// engaged is the only trace of that.
pub fn init_file_logging() {
    let dir = log_dir();
    let opened = fs::create_dir_all(&dir).and_then(|()| File::create(dir.join("easel.log")));
    let file = match opened {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file)
        .with_ansi(false)
        .init();
}

/// Routes diagnostics to stderr for headless sessions.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_absolute() {
        assert!(log_path().is_absolute());
    }

    #[test]
    fn test_log_path_ends_with_easel_log() {
        assert!(log_path().ends_with("easel.log"));
    }
}
