//! Console Hex with a Monte Carlo tree search opponent.
//!
//! Parses the command line, wires up logging and the narration sink, then
//! either runs one match directly (`--mode`) or drops into the menu.

use anyhow::Result;
use clap::Parser;
use hex_mcts::SearchTrace;
use tracing::debug;

mod config;
mod console;
mod game;
mod player;

use crate::config::Config;

/// Diagnostics go through `tracing`; `RUST_LOG` overrides the CLI level.
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level);

    // First acquisition fixes the narration verbosity for the whole run.
    SearchTrace::init(config.verbose);

    debug!(
        board_size = config.board_size,
        decision_time_ms = config.decision_time_ms,
        parallel = config.parallel,
        verbose = config.verbose,
        "starting"
    );

    match config.mode {
        Some(mode) => console::play_once(config.board_size, &config.search_config(), mode),
        None => console::run(&config),
    }
}
