//! Uniform random playouts.

use hex_core::{Board, CellState, Move};
use rand::Rng;

use crate::search::SearchError;
use crate::trace::SearchTrace;

/// Play one game to termination, starting with `mv` by `first_player` and
/// alternating uniformly random legal moves afterwards. Returns the winner.
///
/// The board is an owned copy of the position before `mv`; the caller's
/// board is never touched. Termination is guaranteed: every step fills one
/// cell and a full Hex board always contains a winner, so the winner check
/// fires before the move list can run dry. An empty move list is still
/// treated as an error rather than trusted to be unreachable.
pub fn simulate_random_playout<R: Rng>(
    mv: Move,
    first_player: CellState,
    mut board: Board,
    rng: &mut R,
) -> Result<CellState, SearchError> {
    let trace = SearchTrace::get();

    let mut current = first_player;
    board.make_move(mv.0, mv.1, current)?;
    trace.simulation_start(mv, &board);

    loop {
        if board.check_winner() != CellState::Empty {
            trace.simulation_end(current, &board);
            return Ok(current);
        }

        current = current.opponent();
        let moves = board.get_valid_moves();
        if moves.is_empty() {
            return Err(SearchError::MovesExhausted);
        }
        let (row, col) = moves[rng.gen_range(0..moves.len())];
        trace.simulation_step(current, (row, col));
        board.make_move(row, col, current)?;
    }
}
