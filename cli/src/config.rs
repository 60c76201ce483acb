//! Command-line configuration.
//!
//! All robot parameters enter the engine through [`SearchConfig`]; there is
//! no config file and no environment-variable override. `RUST_LOG` only
//! filters the diagnostics channel.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use hex_core::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use hex_mcts::SearchConfig;

/// Who sits on each side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    /// Human plays Blue, the robot plays Red.
    HumanVsRobot,
    /// Two robots with identical settings.
    RobotVsRobot,
    /// Two humans sharing the console.
    HumanVsHuman,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "hex")]
#[command(about = "Console Hex with a Monte Carlo tree search opponent")]
#[command(
    long_about = "Plays Hex on the console. Blue connects top and bottom, Red connects
left and right, Blue moves first. The robot opponent decides each move with
Monte Carlo tree search under a fixed wall-clock budget."
)]
pub struct Config {
    /// Board side length (2-11)
    #[arg(long, default_value_t = 5)]
    pub board_size: usize,

    /// UCT exploration factor
    #[arg(long, default_value_t = 1.41)]
    pub exploration_factor: f64,

    /// Robot decision budget in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub decision_time_ms: u64,

    /// Run playouts on all available cores
    #[arg(long)]
    pub parallel: bool,

    /// Narrate every search step (single-threaded playouts only)
    #[arg(long)]
    pub verbose: bool,

    /// Log level for diagnostics (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Skip the menu and play one match in this mode
    #[arg(long, value_enum)]
    pub mode: Option<GameMode>,
}

impl Config {
    /// Check the option ranges before anything else runs.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            bail!(
                "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {}",
                self.board_size
            );
        }
        if self.decision_time_ms == 0 {
            bail!("decision time must be at least 1 ms");
        }
        // The search agent re-checks both of these; failing early gives a
        // cleaner message than a mid-menu error.
        if self.parallel && self.verbose {
            bail!("--verbose cannot be combined with --parallel");
        }
        if !(self.exploration_factor > 0.0 && self.exploration_factor.is_finite()) {
            bail!(
                "exploration factor must be positive, got {}",
                self.exploration_factor
            );
        }
        Ok(())
    }

    /// The engine-facing view of these options.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new(
            self.exploration_factor,
            Duration::from_millis(self.decision_time_ms),
        )
        .with_parallel(self.parallel)
        .with_verbose(self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config::parse_from(["hex"])
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = base_config();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.decision_time_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_board() {
        let mut config = base_config();
        config.board_size = 1;
        assert!(config.validate().is_err());
        config.board_size = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_verbose_parallel() {
        let config = Config::parse_from(["hex", "--parallel", "--verbose"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_config_mapping() {
        let config = Config::parse_from([
            "hex",
            "--exploration-factor",
            "2.5",
            "--decision-time-ms",
            "250",
            "--parallel",
        ]);
        let search = config.search_config();
        assert!((search.exploration_factor - 2.5).abs() < 1e-9);
        assert_eq!(search.max_decision_time, Duration::from_millis(250));
        assert!(search.parallel);
        assert!(!search.verbose);
    }
}
