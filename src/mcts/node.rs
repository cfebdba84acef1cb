//! MCTS node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Move, Side, SideMap};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Edge representing a move from a parent node to a child.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    /// The move this edge represents.
    pub mv: Move,

    /// Child node (NONE if not yet expanded).
    pub child: NodeId,

    /// Visit count for this move.
    pub visits: u32,

    /// Total reward accumulated through this edge, per side.
    pub total_reward: SideMap<f64>,
}

impl Edge {
    /// Create a new, unvisited edge.
    pub fn new(mv: Move) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: SideMap::with_value(0.0),
        }
    }

    /// Get the mean reward for a side.
    #[must_use]
    pub fn mean_reward(&self, side: Side) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward[side] / self.visits as f64
        }
    }

    /// Check if this edge has been expanded (child exists).
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the edge from parent that led to this node.
    pub parent_edge_idx: u16,

    /// Side to move at this node.
    pub to_move: Side,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Total visits to this node.
    pub visits: u32,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Terminal rewards (if terminal).
    pub terminal_reward: Option<SideMap<f64>>,

    /// Outgoing edges (legal moves).
    pub edges: SmallVec<[Edge; 8]>,
}

impl MCTSNode {
    /// Create a new node.
    pub fn new(parent: NodeId, parent_edge_idx: u16, to_move: Side, depth: u16) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            visits: 0,
            is_terminal: false,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(to_move: Side) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0)
    }

    /// Check if all edges have been expanded.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.is_expanded())
    }

    /// Check if any edges are unexpanded.
    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Get indices of unexpanded edges.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_expanded())
            .map(|(i, _)| i)
    }

    /// Get the edge with the most visits. Ties go to the earliest edge.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .rev()
            .max_by_key(|e| e.visits)
    }
}
