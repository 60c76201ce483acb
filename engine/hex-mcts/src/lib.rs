//! Monte Carlo Tree Search engine for Hex.
//!
//! Given a board position, the side to move, and a wall-clock budget, the
//! agent picks a move by repeated random playouts scored with the UCT rule:
//!
//! 1. **Expansion**: the root is expanded once, with one child per legal
//!    move. The tree stays one level deep; playouts always start from a
//!    root child.
//! 2. **Selection**: among the root's children, pick the one maximising
//!    UCT(c) = wins/visits + e·√(ln(parent visits) / visits), with
//!    unvisited children scoring +∞ so each is tried at least once.
//! 3. **Playout**: play uniformly random legal moves from the child's
//!    position until one side connects its edges (Hex has no draws).
//! 4. **Backpropagation**: walk from the child up to the root, bumping
//!    visit counters and crediting wins to nodes whose side won.
//!
//! The loop repeats until the deadline passes, then the child with the
//! best win ratio gives the move. With [`SearchConfig::parallel`] set,
//! each iteration runs one playout per hardware thread from the same
//! selected child and aggregates the results (leaf parallelization).
//!
//! # Usage
//!
//! ```rust,ignore
//! use hex_core::{Board, CellState};
//! use hex_mcts::{MctsAgent, SearchConfig};
//! use std::time::Duration;
//!
//! let board = Board::new(5)?;
//! let config = SearchConfig::new(1.41, Duration::from_millis(1000));
//! let mut agent = MctsAgent::new(config)?;
//! let (row, col) = agent.choose_move(&board, CellState::Blue)?;
//! ```

pub mod config;
pub mod node;
pub mod playout;
pub mod search;
pub mod trace;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use node::{Node, NodeId, NodeStats};
pub use playout::simulate_random_playout;
pub use search::{MctsAgent, SearchError};
pub use trace::SearchTrace;
pub use tree::SearchTree;
