//! Interactive console menu.
//!
//! Thin I/O around the game loop: a top-level menu, bounds-checked prompts
//! for the board size and robot settings, and a single-line report for any
//! fatal game error before returning to the menu.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use hex_core::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use hex_mcts::SearchConfig;
use tracing::warn;

use crate::config::{Config, GameMode};
use crate::game::Game;
use crate::player::{HumanPlayer, MctsPlayer, Player};

const BANNER: &str = r"
 _   _
| | | | _____  __
| |_| |/ _ \ \/ /
|  _  |  __/>  <
|_| |_|\___/_/\_\
";

/// Run the interactive menu until the user quits.
pub fn run(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{BANNER}");
    println!("Blue connects top and bottom, Red connects left and right.");
    println!("Blue moves first.");

    let mut board_size = config.board_size;
    let mut search = config.search_config();

    loop {
        println!("\n[1] Human vs robot");
        println!("[2] Robot vs robot");
        println!("[3] Human vs human");
        println!("[4] Robot settings");
        println!("[5] Quit");

        let choice = prompt_usize(&mut input, "Pick an option: ", 1, 5)?;
        let mode = match choice {
            1 => GameMode::HumanVsRobot,
            2 => GameMode::RobotVsRobot,
            3 => GameMode::HumanVsHuman,
            4 => {
                adjust_settings(&mut input, &mut search)?;
                continue;
            }
            _ => return Ok(()),
        };

        board_size = prompt_usize(
            &mut input,
            &format!("Board size ({MIN_BOARD_SIZE}-{MAX_BOARD_SIZE}) [{board_size}]: "),
            MIN_BOARD_SIZE,
            MAX_BOARD_SIZE,
        )?;

        // A fatal game error is reported in one line and drops back here.
        if let Err(err) = play_once(board_size, &search, mode) {
            println!("error: {err:#}");
            warn!(error = %format!("{err:#}"), "game aborted");
        }
    }
}

/// Play one match in the given mode.
pub fn play_once(board_size: usize, search: &SearchConfig, mode: GameMode) -> Result<()> {
    let (blue, red): (Box<dyn Player>, Box<dyn Player>) = match mode {
        GameMode::HumanVsRobot => (
            Box::new(HumanPlayer),
            Box::new(MctsPlayer::new(search.clone())),
        ),
        GameMode::RobotVsRobot => (
            Box::new(MctsPlayer::new(search.clone())),
            Box::new(MctsPlayer::new(search.clone())),
        ),
        GameMode::HumanVsHuman => (Box::new(HumanPlayer), Box::new(HumanPlayer)),
    };

    Game::new(board_size, blue, red)?.play()?;
    Ok(())
}

/// Re-prompt loop for the robot parameters.
///
/// The verbosity of the narration sink is fixed at startup, so it is not
/// offered here; only the budget, exploration factor, and parallelism can
/// change between games.
fn adjust_settings<R: BufRead>(input: &mut R, search: &mut SearchConfig) -> Result<()> {
    let millis = prompt_usize(
        input,
        &format!(
            "Decision time in ms (1-60000) [{}]: ",
            search.max_decision_time.as_millis()
        ),
        1,
        60_000,
    )?;
    let exploration = prompt_f64(
        input,
        &format!(
            "Exploration factor (0.1-10.0) [{}]: ",
            search.exploration_factor
        ),
        0.1,
        10.0,
    )?;
    let parallel = prompt_yes_no(input, "Parallel playouts? (y/n): ")?;

    let candidate = SearchConfig::new(
        exploration,
        std::time::Duration::from_millis(millis as u64),
    )
    .with_parallel(parallel)
    .with_verbose(search.verbose);

    match candidate.validate() {
        Ok(()) => *search = candidate,
        Err(err) => println!("error: {err} (settings unchanged)"),
    }
    Ok(())
}

/// Prompt until the user enters an integer within [lo, hi].
fn prompt_usize<R: BufRead>(input: &mut R, prompt: &str, lo: usize, hi: usize) -> Result<usize> {
    loop {
        let line = prompt_line(input, prompt)?;
        match line.trim().parse::<usize>() {
            Ok(value) if (lo..=hi).contains(&value) => return Ok(value),
            Ok(_) => println!("Value must be between {lo} and {hi}."),
            Err(_) => println!("Please enter a whole number."),
        }
    }
}

/// Prompt until the user enters a number within [lo, hi].
fn prompt_f64<R: BufRead>(input: &mut R, prompt: &str, lo: f64, hi: f64) -> Result<f64> {
    loop {
        let line = prompt_line(input, prompt)?;
        match line.trim().parse::<f64>() {
            Ok(value) if (lo..=hi).contains(&value) => return Ok(value),
            Ok(_) => println!("Value must be between {lo} and {hi}."),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Prompt until the user answers y or n.
fn prompt_yes_no<R: BufRead>(input: &mut R, prompt: &str) -> Result<bool> {
    loop {
        let line = prompt_line(input, prompt)?;
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer 'y' or 'n'."),
        }
    }
}

fn prompt_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    let bytes = input.read_line(&mut line).context("reading input")?;
    if bytes == 0 {
        bail!("input stream closed");
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_usize_reprompts_until_in_bounds() {
        let mut input = Cursor::new("abc\n99\n7\n");
        let value = prompt_usize(&mut input, "n: ", 2, 11).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_prompt_f64_bounds() {
        let mut input = Cursor::new("0\n1.41\n");
        let value = prompt_f64(&mut input, "e: ", 0.1, 10.0).unwrap();
        assert!((value - 1.41).abs() < 1e-9);
    }

    #[test]
    fn test_prompt_yes_no_variants() {
        let mut input = Cursor::new("maybe\nYES\n");
        assert!(prompt_yes_no(&mut input, "? ").unwrap());

        let mut input = Cursor::new("N\n");
        assert!(!prompt_yes_no(&mut input, "? ").unwrap());
    }

    #[test]
    fn test_prompt_fails_on_closed_stream() {
        let mut input = Cursor::new("");
        assert!(prompt_usize(&mut input, "n: ", 2, 11).is_err());
    }

    #[test]
    fn test_adjust_settings_applies_valid_input() {
        let mut search = SearchConfig::default();
        let mut input = Cursor::new("250\n2.0\ny\n");
        adjust_settings(&mut input, &mut search).unwrap();

        assert_eq!(
            search.max_decision_time,
            std::time::Duration::from_millis(250)
        );
        assert!((search.exploration_factor - 2.0).abs() < 1e-9);
        assert!(search.parallel);
    }

    #[test]
    fn test_adjust_settings_keeps_old_values_on_conflict() {
        // A verbose startup config plus a parallel answer is refused.
        let mut search = SearchConfig::default().with_verbose(true);
        let before = search.clone();
        let mut input = Cursor::new("250\n2.0\ny\n");
        adjust_settings(&mut input, &mut search).unwrap();

        assert_eq!(search.max_decision_time, before.max_decision_time);
        assert!(!search.parallel);
    }
}
