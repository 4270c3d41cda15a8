//! Command-line argument parsing for Easel.
//!
//! These are the binary's own flags, not the in-application command console:
//! the console has no argv surface of its own.

use clap::Parser;
use std::path::PathBuf;

/// A desktop drawing-tool prototype with a text command console.
#[derive(Parser, Debug)]
#[command(name = "easel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // === Headless mode options ===
    /// Run without a terminal UI, pumping the console and printing its log
    #[arg(long)]
    pub headless: bool,

    /// Command line to submit in headless mode (repeatable)
    #[arg(long, value_name = "LINE")]
    pub commands: Vec<String>,

    /// Number of pump ticks to run in headless mode
    #[arg(long, value_name = "N", default_value = "32")]
    pub ticks: u32,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(easel::config::Config::default_path)
    }

    /// Validates headless mode arguments.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }
        if self.commands.is_empty() {
            return Err("--headless requires at least one --commands line".to_string());
        }
        if self.ticks == 0 {
            return Err("--ticks must be at least 1".to_string());
        }
        Ok(())
    }
}
