//! Hex board representation and rules for the hexfield engine.
//!
//! This crate provides the game-rules layer shared by the search engine and
//! the console front end:
//! - [`CellState`]: the three-valued cell tag (empty / Blue / Red)
//! - [`Board`]: an N×N Hex grid with move legality, legal-move enumeration,
//!   and connection-based winner detection
//!
//! Blue connects the top and bottom edges of the rhombus, Red connects the
//! left and right edges. Blue moves first by convention. Hex admits no
//! draws: a completely filled board always contains a winning chain for
//! exactly one side.

pub mod board;
pub mod cell;

// Re-export main types for convenience
pub use board::{Board, BoardError, Move, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use cell::CellState;
