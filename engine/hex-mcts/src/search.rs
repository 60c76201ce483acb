//! The search agent: deadline loop, playout bursts, final selection.

use std::thread;
use std::time::Instant;

use hex_core::{Board, BoardError, CellState, Move};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::node::NodeId;
use crate::playout::simulate_random_playout;
use crate::trace::SearchTrace;
use crate::tree::SearchTree;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Step-by-step narration from concurrent playouts would interleave
    /// into garbage, so the combination is refused outright.
    #[error("verbose narration cannot be combined with parallel playouts")]
    VerboseParallelConflict,

    #[error("exploration factor must be a positive finite number, got {0}")]
    NonPositiveExploration(f64),

    /// The deadline passed before a single playout finished, so no child
    /// has statistics to select by. Give the agent more time or a smaller
    /// board.
    #[error("no playout completed within the decision budget")]
    InsufficientBudget,

    /// A playout ran out of legal moves without a winner appearing. A full
    /// Hex board always has a winner, so this indicates a defect.
    #[error("playout exhausted the board without a winner")]
    MovesExhausted,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Outcome of one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// The move chosen for the side to move.
    pub mv: Move,

    /// Win ratio of the chosen root child.
    pub win_ratio: f64,

    /// Iterations completed before the deadline.
    pub iterations: u64,
}

/// Monte Carlo tree search agent.
///
/// Holds the configuration and the generator used by single-threaded
/// playouts; parallel bursts seed a fresh generator per worker thread.
/// Each decision starts from a fresh root: there is no tree reuse between
/// moves.
pub struct MctsAgent {
    config: SearchConfig,
    rng: ChaCha20Rng,
}

impl MctsAgent {
    /// Create an agent, validating the configuration.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha20Rng::from_entropy(),
        })
    }

    /// The agent's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick a move for `player` on `board`.
    pub fn choose_move(
        &mut self,
        board: &Board,
        player: CellState,
    ) -> Result<Move, SearchError> {
        self.search(board, player).map(|result| result.mv)
    }

    /// Run one full decision and report the chosen move with its
    /// statistics.
    pub fn search(
        &mut self,
        board: &Board,
        player: CellState,
    ) -> Result<SearchResult, SearchError> {
        let narrator = SearchTrace::get();
        narrator.decision_start(player);

        let mut tree = SearchTree::new(player);
        tree.expand_root(board);
        for &id in tree.children() {
            if let Some(mv) = tree.get(id).mv {
                narrator.expanded_child(mv);
            }
        }
        if tree.children().is_empty() {
            return Err(SearchError::MovesExhausted);
        }

        let thread_count = if self.config.parallel {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            1
        };
        trace!(
            children = tree.children().len(),
            thread_count,
            "root expanded"
        );

        let deadline = Instant::now() + self.config.max_decision_time;
        let mut iterations: u64 = 0;

        while Instant::now() < deadline {
            iterations += 1;
            narrator.iteration(iterations);

            let (chosen, uct) = tree
                .select_child(self.config.exploration_factor)
                .expect("expanded root has children");
            let node = tree.get(chosen);
            let mv = node.mv.expect("root child carries a move");
            narrator.selected_child(mv, uct);

            if self.config.parallel {
                // Leaf parallelization: every worker plays out the same
                // child, results are aggregated sequentially after join.
                let winners = playout_burst(board, mv, node.player, thread_count)?;
                for winner in winners {
                    record_playout(&tree, chosen, winner, narrator);
                }
            } else {
                let winner =
                    simulate_random_playout(mv, node.player, board.clone(), &mut self.rng)?;
                record_playout(&tree, chosen, winner, narrator);
            }

            if narrator.is_verbose() {
                narrator.root_stats(tree.get(tree.root()).stats(), tree.children().len());
                for &id in tree.children() {
                    let child = tree.get(id);
                    if let Some(mv) = child.mv {
                        narrator.child_stats(mv, child.stats());
                    }
                }
            }
        }

        narrator.timer_elapsed(iterations);
        trace!(iterations, nodes = tree.len(), "decision budget exhausted");

        let (best, win_ratio) = tree.best_child().ok_or(SearchError::InsufficientBudget)?;
        let mv = tree.get(best).mv.expect("root child carries a move");
        narrator.best_child_chosen(iterations, mv, win_ratio);
        narrator.decision_end();
        debug!(
            row = mv.0,
            col = mv.1,
            win_ratio,
            iterations,
            "move chosen"
        );

        Ok(SearchResult {
            mv,
            win_ratio,
            iterations,
        })
    }
}

/// Backpropagate one playout result, narrating each updated node.
fn record_playout(tree: &SearchTree, from: NodeId, winner: CellState, narrator: &SearchTrace) {
    for (id, stats) in tree.backpropagate(from, winner) {
        narrator.backpropagation_step(tree.get(id).mv, stats);
    }
}

/// Run `thread_count` playouts of the same move concurrently and collect
/// the winners. Each worker owns a generator seeded from system entropy.
fn playout_burst(
    board: &Board,
    mv: Move,
    player: CellState,
    thread_count: usize,
) -> Result<Vec<CellState>, SearchError> {
    thread::scope(|scope| {
        let handles: Vec<_> = (0..thread_count)
            .map(|_| {
                scope.spawn(move || {
                    let mut rng = ChaCha20Rng::from_entropy();
                    simulate_random_playout(mv, player, board.clone(), &mut rng)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("playout worker panicked"))
            .collect()
    })
}
