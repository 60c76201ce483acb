//! Hex board state, move legality, and winner detection.
//!
//! The board is stored as a flat row-major array of [`CellState`]. Winner
//! detection is a multi-source depth-first search over the six-direction
//! hex adjacency, seeded from the owning edge of the side under test. The
//! scratch buffers are stack arrays sized for the largest supported board,
//! so a winner check allocates nothing.

use std::fmt;

use thiserror::Error;

use crate::cell::CellState;

/// Smallest playable board.
pub const MIN_BOARD_SIZE: usize = 2;
/// Largest board the console interface (and the DFS scratch space) supports.
pub const MAX_BOARD_SIZE: usize = 11;

const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// A board coordinate as (row, column), both 0-indexed.
pub type Move = (usize, usize);

/// The six neighbour offsets of the hex adjacency, as (row, col) deltas.
///
/// Together with the edge assignment (Blue: rows 0 and size−1, Red:
/// columns 0 and size−1) these fix the game geometry.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 6] =
    [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, -1), (0, -1)];

/// Errors raised by board construction and move application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {0}")]
    InvalidSize(usize),

    #[error("move ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// An N×N Hex board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Create an empty board of the given side length.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![CellState::Empty; size * size],
        })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// State of the cell at (row, col). Panics if out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.size + col]
    }

    /// True iff (row, col) lies on the board.
    #[inline]
    pub fn is_within_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// True iff (row, col) is on the board and empty.
    #[inline]
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.is_within_bounds(row, col) && self.cell(row, col) == CellState::Empty
    }

    /// Place a stone for `player` at (row, col).
    ///
    /// Double placement is an error, not a no-op: an occupied or
    /// out-of-bounds target indicates a defect in the caller.
    pub fn make_move(&mut self, row: usize, col: usize, player: CellState) -> Result<(), BoardError> {
        if !self.is_within_bounds(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        if self.cell(row, col) != CellState::Empty {
            return Err(BoardError::Occupied { row, col });
        }
        self.cells[row * self.size + col] = player;
        Ok(())
    }

    /// All empty cells, in row-major order.
    ///
    /// The order is a contract: the search tree creates children in this
    /// order and breaks ties by it.
    pub fn get_valid_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.cells.len());
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cell(row, col) == CellState::Empty {
                    moves.push((row, col));
                }
            }
        }
        moves
    }

    /// The winning side, or `Empty` when neither side has connected its
    /// edges yet.
    ///
    /// Blue wins with a chain of Blue cells joining row 0 to row size−1;
    /// Red with a chain joining column 0 to column size−1. Blue is checked
    /// first, so on (unreachable in legal play) double-win positions Blue
    /// is reported. The check never mutates the board.
    pub fn check_winner(&self) -> CellState {
        if self.edges_connected(CellState::Blue) {
            CellState::Blue
        } else if self.edges_connected(CellState::Red) {
            CellState::Red
        } else {
            CellState::Empty
        }
    }

    /// DFS from every `player` stone on the owning start edge; true iff the
    /// traversal reaches the opposite edge.
    fn edges_connected(&self, player: CellState) -> bool {
        let mut visited = [false; MAX_CELLS];
        let mut stack = [0usize; MAX_CELLS];
        let mut depth = 0usize;

        for i in 0..self.size {
            let (row, col) = match player {
                CellState::Blue => (0, i),
                _ => (i, 0),
            };
            let idx = row * self.size + col;
            if self.cells[idx] == player {
                visited[idx] = true;
                stack[depth] = idx;
                depth += 1;
            }
        }

        while depth > 0 {
            depth -= 1;
            let idx = stack[depth];
            let (row, col) = (idx / self.size, idx % self.size);

            let reached_far_edge = match player {
                CellState::Blue => row == self.size - 1,
                _ => col == self.size - 1,
            };
            if reached_far_edge {
                return true;
            }

            for (dr, dc) in NEIGHBOUR_OFFSETS {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr < 0 || nc < 0 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if !self.is_within_bounds(nr, nc) {
                    continue;
                }
                let nidx = nr * self.size + nc;
                if !visited[nidx] && self.cells[nidx] == player {
                    visited[nidx] = true;
                    stack[depth] = nidx;
                    depth += 1;
                }
            }
        }

        false
    }
}

/// Rhombus rendering matching the human input convention: 1-indexed row
/// numbers on the right, a lowercase column legend underneath.
///
/// ```text
/// . - B - . 1
///  \ / \ / \
///   . - R - . 2
///    \ / \ / \
///     . - . - . 3
///       a b c
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{:indent$}", "", indent = 2 * row)?;
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " - ")?;
                }
                write!(f, "{}", self.cell(row, col))?;
            }
            writeln!(f, " {}", row + 1)?;

            if row + 1 < self.size {
                write!(f, "{:indent$}", "", indent = 2 * row + 1)?;
                for _ in 0..self.size - 1 {
                    write!(f, "\\ / ")?;
                }
                writeln!(f, "\\")?;
            }
        }

        write!(f, "{:indent$}", "", indent = 2 * self.size)?;
        for col in 0..self.size {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", (b'a' + col as u8) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn board_with(size: usize, stones: &[(usize, usize, CellState)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(row, col, player) in stones {
            board.make_move(row, col, player).unwrap();
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(board.cell(row, col), CellState::Empty);
            }
        }
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(Board::new(0).unwrap_err(), BoardError::InvalidSize(0));
        assert_eq!(Board::new(1).unwrap_err(), BoardError::InvalidSize(1));
        assert_eq!(Board::new(12).unwrap_err(), BoardError::InvalidSize(12));
        assert!(Board::new(2).is_ok());
        assert!(Board::new(11).is_ok());
    }

    #[test]
    fn test_move_legality() {
        let mut board = Board::new(3).unwrap();
        assert!(board.is_valid_move(0, 0));
        assert!(!board.is_valid_move(3, 0));
        assert!(!board.is_valid_move(0, 3));

        board.make_move(0, 0, CellState::Blue).unwrap();
        assert!(!board.is_valid_move(0, 0));
        assert_eq!(
            board.make_move(0, 0, CellState::Red).unwrap_err(),
            BoardError::Occupied { row: 0, col: 0 }
        );
        assert_eq!(
            board.make_move(5, 1, CellState::Red).unwrap_err(),
            BoardError::OutOfBounds { row: 5, col: 1 }
        );
    }

    #[test]
    fn test_valid_moves_row_major_order() {
        let board = Board::new(3).unwrap();
        let expected: Vec<Move> = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .collect();
        assert_eq!(board.get_valid_moves(), expected);
    }

    #[test]
    fn test_valid_moves_skip_occupied() {
        let board = board_with(3, &[(0, 1, CellState::Blue), (2, 2, CellState::Red)]);
        let moves = board.get_valid_moves();
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&(0, 1)));
        assert!(!moves.contains(&(2, 2)));
        // Still row-major
        let mut sorted = moves.clone();
        sorted.sort();
        assert_eq!(moves, sorted);
    }

    #[test]
    fn test_blue_vertical_line_wins() {
        let board = board_with(
            3,
            &[
                (0, 0, CellState::Blue),
                (1, 0, CellState::Blue),
                (2, 0, CellState::Blue),
            ],
        );
        assert_eq!(board.check_winner(), CellState::Blue);
    }

    #[test]
    fn test_red_horizontal_line_wins() {
        let board = board_with(
            3,
            &[
                (0, 0, CellState::Red),
                (0, 1, CellState::Red),
                (0, 2, CellState::Red),
            ],
        );
        assert_eq!(board.check_winner(), CellState::Red);
    }

    #[test]
    fn test_blue_diagonal_chain_wins() {
        // (0,2)-(1,1) and (1,1)-(2,1) are neighbours under the hex offsets.
        let board = board_with(
            3,
            &[
                (0, 2, CellState::Blue),
                (1, 1, CellState::Blue),
                (2, 1, CellState::Blue),
            ],
        );
        assert_eq!(board.check_winner(), CellState::Blue);
    }

    #[test]
    fn test_red_zigzag_wins() {
        let board = board_with(
            5,
            &[
                (3, 0, CellState::Red),
                (3, 1, CellState::Red),
                (2, 2, CellState::Red),
                (1, 3, CellState::Red),
                (1, 4, CellState::Red),
            ],
        );
        assert_eq!(board.check_winner(), CellState::Red);
    }

    #[test]
    fn test_disconnected_stones_no_winner() {
        let board = board_with(
            3,
            &[
                (0, 0, CellState::Blue),
                (1, 1, CellState::Blue),
                (2, 0, CellState::Blue),
            ],
        );
        assert_eq!(board.check_winner(), CellState::Empty);
    }

    #[test]
    fn test_check_winner_is_pure() {
        let board = board_with(
            4,
            &[
                (0, 0, CellState::Blue),
                (1, 0, CellState::Blue),
                (0, 3, CellState::Red),
            ],
        );
        let snapshot = board.clone();
        let _ = board.check_winner();
        assert_eq!(board, snapshot);
    }

    /// A full Hex board always contains exactly one winning chain.
    #[test]
    fn test_full_board_always_has_winner() {
        for seed in 0..40u64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            for size in MIN_BOARD_SIZE..=7 {
                let mut board = Board::new(size).unwrap();
                let mut cells = board.get_valid_moves();
                cells.shuffle(&mut rng);

                let mut player = CellState::Blue;
                for (row, col) in cells {
                    board.make_move(row, col, player).unwrap();
                    player = player.opponent();
                }

                assert_ne!(
                    board.check_winner(),
                    CellState::Empty,
                    "full {size}x{size} board must have a winner (seed={seed})"
                );
            }
        }
    }

    #[test]
    fn test_display_layout() {
        let board = board_with(3, &[(0, 1, CellState::Blue), (1, 1, CellState::Red)]);
        let rendered = board.to_string();
        let expected = ". - B - . 1\n \\ / \\ / \\\n  . - R - . 2\n   \\ / \\ / \\\n    . - . - . 3\n      a b c";
        assert_eq!(rendered, expected);
    }
}
