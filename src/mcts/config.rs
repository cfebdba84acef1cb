//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: 0.3 * sqrt(2)).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Search iterations per move.
    pub iterations: u32,

    /// Maximum nodes to allocate in the tree.
    /// Prevents memory exhaustion on large searches.
    pub max_nodes: usize,

    /// Plies a random rollout may play before it is scored as a draw.
    pub rollout_limit: u32,

    /// Random seed for simulation RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2 * 0.3,
            iterations: 8192,
            max_nodes: 100_000,
            rollout_limit: 256,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom rollout cap.
    #[must_use]
    pub fn with_rollout_limit(mut self, plies: u32) -> Self {
        self.rollout_limit = plies;
        self
    }
}
