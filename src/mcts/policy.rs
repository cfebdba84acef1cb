//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to explore (UCB1)
//! - `SimulationPolicy`: How to run rollouts (uniform random)

use crate::core::{GameRng, SideMap};

use super::config::MCTSConfig;
use super::node::MCTSNode;
use super::position::Bitboard;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select the edge to follow from a fully expanded node.
    ///
    /// Scores are taken from the point of view of `node.to_move`.
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: Q(a) + c * sqrt(ln(N) / n(a))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, node: &MCTSNode, config: &MCTSConfig) -> usize {
        if node.edges.is_empty() {
            return 0;
        }

        let ln_parent = (node.visits.max(1) as f64).ln();

        node.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let exploitation = edge.mean_reward(node.to_move);
                let exploration = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    config.exploration_constant * (ln_parent / edge.visits as f64).sqrt()
                };
                (i, exploitation + exploration)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Outcome of one rollout.
#[derive(Clone, Debug, PartialEq)]
pub struct Rollout {
    /// Per-side rewards.
    pub rewards: SideMap<f64>,
    /// Plies played.
    pub plies: u32,
    /// Whether the ply cap ended the rollout.
    pub cut_off: bool,
}

/// Policy for running simulations (rollouts) from a leaf position.
pub trait SimulationPolicy: Send + Sync {
    /// Play out `position` and score it. The position is consumed by value.
    fn simulate(&self, position: Bitboard, rng: &mut GameRng, limit: u32) -> Rollout;
}

/// Random simulation policy.
///
/// Plays uniformly random legal moves until terminal or the ply cap, which
/// scores as a draw.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl SimulationPolicy for RandomSimulation {
    fn simulate(&self, mut position: Bitboard, rng: &mut GameRng, limit: u32) -> Rollout {
        let mut plies = 0;

        loop {
            if let Some(result) = position.result() {
                return Rollout {
                    rewards: result.rewards(),
                    plies,
                    cut_off: false,
                };
            }

            let moves = position.legal_moves();
            if plies >= limit || moves.is_empty() {
                return Rollout {
                    rewards: SideMap::with_value(0.5),
                    plies,
                    cut_off: true,
                };
            }

            let idx = rng.gen_range_usize(0..moves.len());
            position.play(moves[idx]);
            plies += 1;
        }
    }
}
