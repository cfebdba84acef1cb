//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Iterations performed.
    pub iterations: u32,

    /// Nodes expanded (added to tree).
    pub nodes_expanded: u32,

    /// Rollouts performed.
    pub simulations: u32,

    /// Plies played across all rollouts.
    pub rollout_plies: u64,

    /// Rollouts stopped by the ply cap and scored as draws.
    pub rollout_cutoffs: u32,

    /// Maximum tree depth reached.
    pub max_depth: u16,

    /// Wall time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Mean rollout length in plies.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollout_plies as f64 / self.simulations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_rates() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.avg_rollout_length(), 0.0);

        stats.iterations = 1000;
        stats.time_us = 1_000_000;
        stats.simulations = 10;
        stats.rollout_plies = 250;

        assert_eq!(stats.iterations_per_second(), 1000.0);
        assert_eq!(stats.avg_rollout_length(), 25.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.iterations = 100;
        stats.rollout_cutoffs = 3;

        stats.reset();

        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.rollout_cutoffs, 0);
    }
}
