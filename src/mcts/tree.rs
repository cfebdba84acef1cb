//! Arena-based MCTS tree.
//!
//! Nodes live in a flat `Vec<MCTSNode>` and refer to each other by index,
//! so a finished tree can be dumped with serde for offline inspection.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::Side;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    nodes: Vec<MCTSNode>,
    root: NodeId,
}

impl MCTSTree {
    /// Create a new tree with a root node.
    pub fn new(root_side: Side) -> Self {
        Self::with_capacity(root_side, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_side: Side, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(MCTSNode::root(root_side));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let total_edges: usize = self.nodes.iter().map(|n| n.edges.len()).sum();
        let expanded_edges: usize = self
            .nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .filter(|e| e.is_expanded())
            .count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            total_edges,
            expanded_edges,
        }
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, root_side: Side) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(root_side));
        self.root = NodeId::new(0);
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    pub fn root_node_mut(&mut self) -> &mut MCTSNode {
        self.get_mut(self.root)
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Total number of edges (moves).
    pub total_edges: usize,

    /// Number of expanded edges (with children).
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Average edges per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }
}
