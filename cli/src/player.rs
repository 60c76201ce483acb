//! Move providers for the game loop.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use hex_core::{Board, CellState, Move};
use hex_mcts::{MctsAgent, SearchConfig};

/// Anything that can choose a move given a board and the side to move.
pub trait Player {
    fn choose_move(&mut self, board: &Board, side: CellState) -> Result<Move>;
}

/// Human at the console. Moves are entered as a 1-indexed row number and a
/// letter column ("3 b"), matching the board rendering; anything invalid
/// re-prompts.
pub struct HumanPlayer;

impl Player for HumanPlayer {
    fn choose_move(&mut self, board: &Board, _side: CellState) -> Result<Move> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        read_move(&mut input, board)
    }
}

/// Prompt on stdout and parse moves from `input` until one is legal.
///
/// Recovers locally from every malformed or illegal entry; the only error
/// it returns is the input stream running out.
pub fn read_move<R: BufRead>(input: &mut R, board: &Board) -> Result<Move> {
    loop {
        print!("Enter the row as a number and the column as a letter, separated by a space: ");
        io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        let bytes = input.read_line(&mut line).context("reading move")?;
        if bytes == 0 {
            bail!("input stream closed before a move was entered");
        }

        match parse_move(line.trim(), board.size()) {
            Ok((row, col)) => {
                if board.is_valid_move(row, col) {
                    return Ok((row, col));
                }
                println!("That cell is taken! Try again.");
            }
            Err(reason) => println!("{reason} Try again."),
        }
    }
}

/// Parse "row-number column-letter" into 0-indexed coordinates, checking
/// both against the board size.
fn parse_move(line: &str, size: usize) -> std::result::Result<Move, String> {
    let mut parts = line.split_whitespace();
    let (Some(row_text), Some(col_text), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("Expected a row number and a column letter.".to_string());
    };

    let row: usize = row_text
        .parse()
        .map_err(|_| format!("'{row_text}' is not a row number."))?;
    if !(1..=size).contains(&row) {
        return Err(format!("Row must be between 1 and {size}."));
    }

    let mut col_chars = col_text.chars();
    let (Some(col_char), None) = (col_chars.next(), col_chars.next()) else {
        return Err(format!("'{col_text}' is not a column letter."));
    };
    let last_col = (b'a' + (size - 1) as u8) as char;
    if !('a'..=last_col).contains(&col_char) {
        return Err(format!("Column must be between 'a' and '{last_col}'."));
    }

    Ok((row - 1, (col_char as u8 - b'a') as usize))
}

/// The robot: a fresh search agent for every move, so no tree survives
/// between decisions.
pub struct MctsPlayer {
    config: SearchConfig,
}

impl MctsPlayer {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl Player for MctsPlayer {
    fn choose_move(&mut self, board: &Board, side: CellState) -> Result<Move> {
        let mut agent = MctsAgent::new(self.config.clone())?;
        agent
            .choose_move(board, side)
            .context("the robot could not choose a move")
    }
}
