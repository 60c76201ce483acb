//! Search tree nodes.
//!
//! A node represents "the position reached by playing `mv` from the parent,
//! with `player` the side that just moved". The root is a sentinel: no move,
//! `player` set to the side to move at the real position. Counters live
//! behind a per-node mutex so backpropagation can update them one lock at a
//! time while observers read concurrently.

use std::sync::Mutex;

use hex_core::{CellState, Move};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Visit and win counters of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub wins: u32,
    pub visits: u32,
}

impl NodeStats {
    /// wins / visits, or 0.0 when unvisited.
    #[inline]
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}

/// A node in the search tree.
#[derive(Debug)]
pub struct Node {
    /// Parent node index (NONE for the root).
    pub parent: NodeId,

    /// Move that led to this node; `None` for the root sentinel.
    pub mv: Option<Move>,

    /// The side that played `mv`. For the root, the side to move: children
    /// inherit it, so win ratios at root children measure the fraction of
    /// playouts won by the side choosing the move.
    pub player: CellState,

    /// Children in creation order; populated only on the root in the
    /// depth-1 tree. The order matters: ties in selection go to the
    /// earlier child.
    pub children: Vec<NodeId>,

    stats: Mutex<NodeStats>,
}

impl Node {
    /// Create the root sentinel for the given side to move.
    pub fn new_root(side_to_move: CellState) -> Self {
        Self {
            parent: NodeId::NONE,
            mv: None,
            player: side_to_move,
            children: Vec::new(),
            stats: Mutex::new(NodeStats::default()),
        }
    }

    /// Create a child for `mv`, played by `player`.
    pub fn new_child(parent: NodeId, mv: Move, player: CellState) -> Self {
        Self {
            parent,
            mv: Some(mv),
            player,
            children: Vec::new(),
            stats: Mutex::new(NodeStats::default()),
        }
    }

    /// Snapshot of the counters.
    #[inline]
    pub fn stats(&self) -> NodeStats {
        *self.stats.lock().expect("node mutex poisoned")
    }

    /// Record one playout outcome: the visit always counts, the win only
    /// when `winner` matches this node's side.
    pub fn record(&self, winner: CellState) -> NodeStats {
        let mut stats = self.stats.lock().expect("node mutex poisoned");
        stats.visits += 1;
        if winner == self.player {
            stats.wins += 1;
        }
        *stats
    }

    /// UCT score against a parent with `parent_visits` visits.
    ///
    /// Unvisited children score +∞, forcing every child to be tried once
    /// before any visited one is revisited.
    pub fn uct_score(&self, parent_visits: u32, exploration_factor: f64) -> f64 {
        let stats = self.stats();
        if stats.visits == 0 {
            return f64::INFINITY;
        }
        let exploitation = f64::from(stats.wins) / f64::from(stats.visits);
        let exploration = exploration_factor
            * (f64::from(parent_visits).ln() / f64::from(stats.visits)).sqrt();
        exploitation + exploration
    }
}
