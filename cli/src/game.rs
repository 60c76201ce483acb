//! The turn-alternating game loop.

use anyhow::Result;
use hex_core::{Board, CellState};
use tracing::info;

use crate::player::Player;

/// One match of Hex between two move providers. Blue sits first and moves
/// first.
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
    current: usize,
}

impl Game {
    pub fn new(board_size: usize, blue: Box<dyn Player>, red: Box<dyn Player>) -> Result<Self> {
        Ok(Self {
            board: Board::new(board_size)?,
            players: [blue, red],
            current: 0,
        })
    }

    /// Run the match to completion and return the winner.
    pub fn play(&mut self) -> Result<CellState> {
        let mut moves_played = 0u32;

        while self.board.check_winner() == CellState::Empty {
            let side = if self.current == 0 {
                CellState::Blue
            } else {
                CellState::Red
            };

            println!("\nPlayer {side}'s turn:");
            println!("{}\n", self.board);

            let (row, col) = self.players[self.current].choose_move(&self.board, side)?;
            println!(
                "\nPlayer {side} chose move: {} {}",
                row + 1,
                (b'a' + col as u8) as char
            );

            self.board.make_move(row, col, side)?;
            moves_played += 1;
            self.current = 1 - self.current;
        }

        println!("\n{}\n", self.board);
        let winner = self.board.check_winner();
        println!("Player {winner} wins!");
        info!(%winner, moves_played, size = self.board.size(), "game finished");
        Ok(winner)
    }

    /// The board in its current state.
    pub fn board(&self) -> &Board {
        &self.board
    }
}
