//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by [`NodeId`]
//! index; ownership flows root → children while parent links are plain
//! indices. The tree built here is deliberately one level deep: the root is
//! expanded exactly once and playouts start from its children. The
//! backpropagation walk still follows parent links all the way up, so the
//! accounting carries over unchanged if the tree ever grows deeper.

use hex_core::{Board, CellState};

use crate::node::{Node, NodeId, NodeStats};

/// Arena-backed search tree rooted at the current position.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SearchTree {
    /// Create a tree holding only the root sentinel.
    pub fn new(side_to_move: CellState) -> Self {
        Self {
            nodes: vec![Node::new_root(side_to_move)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// The root's children, in creation (row-major) order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.get(self.root).children
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand the root with one child per legal move, in the board's
    /// row-major enumeration order. Children inherit the root's `player`:
    /// they stand for moves made by the side to move at the root.
    pub fn expand_root(&mut self, board: &Board) {
        let root = self.root;
        let player = self.get(root).player;
        let moves = board.get_valid_moves();

        let mut ids = Vec::with_capacity(moves.len());
        for mv in moves {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(Node::new_child(root, mv, player));
            ids.push(id);
        }
        self.nodes[root.0 as usize].children = ids;
    }

    /// Pick the root child with the highest UCT score.
    ///
    /// Children are scanned in stored order and only a strictly greater
    /// score displaces the incumbent, so ties go to the earlier child and
    /// the first unvisited child wins outright. Returns the chosen id and
    /// its score; `None` when the root has no children.
    pub fn select_child(&self, exploration_factor: f64) -> Option<(NodeId, f64)> {
        let parent_visits = self.get(self.root).stats().visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &id in self.children() {
            let score = self.get(id).uct_score(parent_visits, exploration_factor);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((id, score)),
            }
        }
        best
    }

    /// Credit one playout outcome to every node from `from` up to the root.
    ///
    /// Each node's mutex is taken and released before moving to its parent;
    /// no two locks are ever held at once. Returns the per-node stats
    /// snapshots in walk order, for the caller's narration.
    pub fn backpropagate(&self, from: NodeId, winner: CellState) -> Vec<(NodeId, NodeStats)> {
        let mut updated = Vec::with_capacity(2);
        let mut current = from;
        while current.is_some() {
            let node = self.get(current);
            let stats = node.record(winner);
            updated.push((current, stats));
            current = node.parent;
        }
        updated
    }

    /// The root child with the highest win ratio, with that ratio.
    ///
    /// Children that never got a visit carry no statistics and are
    /// skipped; ties go to the earlier child. `None` when no child has
    /// been visited at all.
    pub fn best_child(&self) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;

        for &id in self.children() {
            let stats = self.get(id).stats();
            if stats.visits == 0 {
                continue;
            }
            let ratio = stats.win_ratio();
            match best {
                Some((_, top)) if ratio <= top => {}
                _ => best = Some((id, ratio)),
            }
        }
        best
    }
}
