//! Core MCTS search algorithm.
//!
//! Each iteration copies the root position, walks down the tree with the
//! selection policy, expands one new child, plays a rollout from it and
//! backs the per-side rewards up the path. The answer is the most visited
//! root move.
//!
//! A search can be given a cancel flag. It is checked between iterations,
//! and once set the search stops and answers from the visits so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, enabled, instrument, Level};

use crate::core::{GameRng, Move, Side, SideMap};

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
use super::position::Bitboard;
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Owns the search tree, configuration and RNG, and provides methods to run
/// searches. A context can be reused; each `search` starts a fresh tree.
pub struct MCTSSearch {
    config: MCTSConfig,
    tree: MCTSTree,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    simulation: Box<dyn SimulationPolicy>,
    stats: SearchStats,
    cancel: Option<Arc<AtomicBool>>,
}

impl MCTSSearch {
    /// Create a new MCTS search context seeded from `config.seed`.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create a search context drawing randomness from `rng`.
    pub fn with_rng(config: MCTSConfig, rng: GameRng) -> Self {
        Self {
            tree: MCTSTree::with_capacity(Side::Black, config.max_nodes.min(1 << 16)),
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
            cancel: None,
        }
    }

    /// Stop searching as soon as `flag` is set.
    #[must_use]
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Run `config.iterations` iterations from `root`.
    ///
    /// Returns the best move for the side to move, or `None` if the
    /// position is terminal or that side cannot move.
    #[instrument(skip_all, fields(side = %root.to_move()))]
    pub fn search(&mut self, root: &Bitboard) -> Option<Move> {
        let start = Instant::now();
        self.stats.reset();
        self.tree.reset(root.to_move());

        let root_id = self.tree.root();
        self.expand_node(root_id, root);

        if self.tree.get(root_id).is_terminal || self.tree.get(root_id).edges.is_empty() {
            return None;
        }

        // Single legal move needs no search.
        if self.tree.get(root_id).edges.len() == 1 {
            return Some(self.tree.get(root_id).edges[0].mv);
        }

        for _ in 0..self.config.iterations {
            if self.is_cancelled() {
                debug!(iterations = self.stats.iterations, "Search cancelled");
                break;
            }
            self.iteration(*root);
            self.stats.iterations += 1;

            if self.tree.len() >= self.config.max_nodes {
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let best = self.best_move();
        if enabled!(Level::DEBUG) {
            let tree = self.tree.stats();
            debug!(
                iterations = self.stats.iterations,
                per_second = self.stats.iterations_per_second(),
                avg_rollout = self.stats.avg_rollout_length(),
                cutoffs = self.stats.rollout_cutoffs,
                nodes = tree.node_count,
                branching = tree.branching_factor(),
                best = ?best,
                "Search finished"
            );
        }
        best
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, mut position: Bitboard) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.is_terminal {
                let rewards = node
                    .terminal_reward
                    .clone()
                    .unwrap_or_else(|| SideMap::with_value(0.5));
                self.backpropagate(&path, &rewards);
                return;
            }

            if node.edges.is_empty() {
                self.backpropagate(&path, &SideMap::with_value(0.5));
                return;
            }

            if node.has_unexpanded() {
                let edge_idx = self.select_unexpanded(current);
                path.push((current, edge_idx));
                position.play(self.tree.get(current).edges[edge_idx].mv);

                let child = self.expand_child(current, edge_idx, &position);
                let rewards = match self.tree.get(child).terminal_reward.clone() {
                    Some(rewards) => rewards,
                    None => self.simulate(position),
                };
                self.backpropagate(&path, &rewards);
                return;
            }

            let edge_idx = self.selection.select(node, &self.config);
            path.push((current, edge_idx));
            let edge = &self.tree.get(current).edges[edge_idx];
            position.play(edge.mv);
            current = edge.child;
        }
    }

    /// Add an edge for every legal move, or mark the node terminal.
    fn expand_node(&mut self, node_id: NodeId, position: &Bitboard) {
        if let Some(result) = position.result() {
            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.terminal_reward = Some(result.rewards());
            return;
        }

        let node = self.tree.get_mut(node_id);
        node.edges.extend(position.legal_moves().into_iter().map(Edge::new));
        self.stats.nodes_expanded += 1;
    }

    /// Select an unexpanded edge at random.
    fn select_unexpanded(&mut self, node_id: NodeId) -> usize {
        let unexpanded: Vec<usize> = self.tree.get(node_id).unexpanded_edges().collect();
        match unexpanded.len() {
            0 => 0,
            1 => unexpanded[0],
            n => unexpanded[self.rng.gen_range_usize(0..n)],
        }
    }

    /// Allocate and expand the child behind `edge_idx`.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, position: &Bitboard) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let child = MCTSNode::new(parent_id, edge_idx as u16, position.to_move(), depth);
        let child_id = self.tree.alloc(child);
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        self.expand_node(child_id, position);
        child_id
    }

    fn simulate(&mut self, position: Bitboard) -> SideMap<f64> {
        let mut sim_rng = self.rng.fork();
        let rollout = self
            .simulation
            .simulate(position, &mut sim_rng, self.config.rollout_limit);

        self.stats.simulations += 1;
        self.stats.rollout_plies += u64::from(rollout.plies);
        if rollout.cut_off {
            self.stats.rollout_cutoffs += 1;
        }
        rollout.rewards
    }

    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: &SideMap<f64>) {
        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            for side in Side::BOTH {
                edge.total_reward[side] += rewards[side];
            }
        }

        if path.is_empty() {
            self.tree.root_node_mut().visits += 1;
        }
    }

    fn best_move(&self) -> Option<Move> {
        self.tree.root_node().best_edge_by_visits().map(|e| e.mv)
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Move visit counts at the root.
    pub fn move_visits(&self) -> Vec<(Move, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv, e.visits))
            .collect()
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}
