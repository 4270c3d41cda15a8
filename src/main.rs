//! Easel - a desktop drawing-tool prototype with a text command console.

mod cli;
mod tui;

use std::time::Duration;

use anyhow::Context;
use cli::Cli;
use easel::config::Config;
use easel::logging;
use tracing::info;

fn main() {
    let cli = Cli::parse_args();

    if cli.headless {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Err(msg) = cli.validate_headless() {
        anyhow::bail!(msg);
    }

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    if cli.headless {
        run_headless(&config, &cli.commands, cli.ticks);
        return Ok(());
    }

    tui::run(&config).context("terminal session failed")?;
    Ok(())
}

/// Pumps the console without a terminal and prints its transcript.
///
/// Each `--commands` line goes through the same submission path the input
/// bar uses; the remaining ticks drain whatever the lines left in the
/// buffer.
fn run_headless(config: &Config, lines: &[String], ticks: u32) {
    let mut app = tui::App::new(config);

    for line in lines {
        app.submit_line(line);
    }
    for tick in 0..ticks {
        if !app.running {
            break;
        }
        app.on_tick(Duration::from_millis(u64::from(tick) * config.console.tick_rate_ms));
    }

    for line in &app.transcript {
        println!("{}", line.text());
    }
}
