//! Process-wide narration sink for the search.
//!
//! This is the user-facing channel: it tells the person at the console what
//! the robot is doing, either as a single "thinking" breadcrumb or, in
//! verbose mode, as a step-by-step narration of every selection, playout,
//! and backpropagation. Diagnostics for operators go through `tracing`
//! instead.
//!
//! The sink is a single global with init-once verbosity: the first call to
//! [`SearchTrace::init`] fixes the verbosity for the process lifetime and
//! later calls ignore their argument. Every write is serialized by an
//! internal mutex, so the methods are callable from any thread. Verbose
//! narration is only meaningful with single-threaded playouts; the agent
//! refuses the verbose + parallel combination at construction.

use std::fmt::Arguments;
use std::io::{self, Write};
use std::sync::Mutex;

use hex_core::{Board, CellState, Move};
use once_cell::sync::OnceCell;

use crate::node::NodeStats;

static TRACE: OnceCell<SearchTrace> = OnceCell::new();

/// Thread-safe, init-once narration sink.
#[derive(Debug)]
pub struct SearchTrace {
    verbose: bool,
    sink: Mutex<()>,
}

impl SearchTrace {
    /// Create or retrieve the process-wide instance.
    ///
    /// The first call wins: if the sink already exists, `verbose` is
    /// ignored and the existing instance is returned.
    pub fn init(verbose: bool) -> &'static SearchTrace {
        TRACE.get_or_init(|| SearchTrace {
            verbose,
            sink: Mutex::new(()),
        })
    }

    /// Retrieve the instance, creating a non-verbose one if none exists.
    pub fn get() -> &'static SearchTrace {
        Self::init(false)
    }

    /// Whether step-by-step narration is on.
    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Serialized write of one line. `always` bypasses the verbosity gate.
    fn line(&self, always: bool, args: Arguments<'_>) {
        if !always && !self.verbose {
            return;
        }
        let _guard = self.sink.lock().expect("trace mutex poisoned");
        let stdout = io::stdout();
        let mut out = stdout.lock();
        // A failed console write is not worth failing a search over.
        let _ = writeln!(out, "{args}");
    }

    /// Start of a decision: a banner in verbose mode, otherwise the
    /// always-printed breadcrumb telling the user the robot is busy.
    pub fn decision_start(&self, player: CellState) {
        if self.verbose {
            self.line(
                false,
                format_args!("\n------------- MCTS START - {player} to move -------------\n"),
            );
        } else {
            self.line(true, format_args!("Thinking..."));
        }
    }

    pub fn expanded_child(&self, mv: Move) {
        self.line(false, format_args!("expanded root child {},{}", mv.0, mv.1));
    }

    pub fn iteration(&self, number: u64) {
        self.line(
            false,
            format_args!("\n---------- iteration {number} ----------"),
        );
    }

    pub fn selected_child(&self, mv: Move, uct: f64) {
        if uct.is_infinite() {
            self.line(
                false,
                format_args!("selected child {},{} with UCT of infinity", mv.0, mv.1),
            );
        } else {
            self.line(
                false,
                format_args!("selected child {},{} with UCT of {uct:.4}", mv.0, mv.1),
            );
        }
    }

    pub fn simulation_start(&self, mv: Move, board: &Board) {
        self.line(
            false,
            format_args!(
                "simulating a random playout from {},{}; board is:\n{board}",
                mv.0, mv.1
            ),
        );
    }

    pub fn simulation_step(&self, player: CellState, mv: Move) {
        self.line(
            false,
            format_args!("{player} makes random move {},{}", mv.0, mv.1),
        );
    }

    pub fn simulation_end(&self, winner: CellState, board: &Board) {
        self.line(
            false,
            format_args!("detected win for {winner}; final playout board:\n{board}"),
        );
    }

    /// One line per node updated by a backpropagation walk. The root is
    /// the node without a move.
    pub fn backpropagation_step(&self, mv: Option<Move>, stats: NodeStats) {
        match mv {
            Some((row, col)) => self.line(
                false,
                format_args!(
                    "backpropagated to {row},{col}: {} wins / {} visits",
                    stats.wins, stats.visits
                ),
            ),
            None => self.line(
                false,
                format_args!(
                    "backpropagated to root: {} wins / {} visits",
                    stats.wins, stats.visits
                ),
            ),
        }
    }

    pub fn root_stats(&self, stats: NodeStats, child_count: usize) {
        self.line(
            false,
            format_args!(
                "root now has {} visits, {} wins, {child_count} children:",
                stats.visits, stats.wins
            ),
        );
    }

    pub fn child_stats(&self, mv: Move, stats: NodeStats) {
        if stats.visits == 0 {
            self.line(
                false,
                format_args!(
                    "  child {},{}: wins {}, visits {}, win ratio n/a",
                    mv.0, mv.1, stats.wins, stats.visits
                ),
            );
        } else {
            self.line(
                false,
                format_args!(
                    "  child {},{}: wins {}, visits {}, win ratio {:.2}",
                    mv.0,
                    mv.1,
                    stats.wins,
                    stats.visits,
                    stats.win_ratio()
                ),
            );
        }
    }

    pub fn timer_elapsed(&self, iterations: u64) {
        self.line(
            false,
            format_args!(
                "\ntimer ran out after {iterations} iterations; choosing from root's children"
            ),
        );
    }

    pub fn best_child_chosen(&self, iterations: u64, mv: Move, win_ratio: f64) {
        self.line(
            false,
            format_args!(
                "after {iterations} iterations, chose child {},{} with win ratio {win_ratio:.4}",
                mv.0, mv.1
            ),
        );
    }

    pub fn decision_end(&self) {
        self.line(
            false,
            format_args!("\n------------------ MCTS END ------------------\n"),
        );
    }
}
