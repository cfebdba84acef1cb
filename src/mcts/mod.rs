//! Monte Carlo Tree Search evaluator.
//!
//! ## Overview
//!
//! The "plain bot" evaluator: a UCB1 tree search with uniformly random
//! rollouts over a compact [`Bitboard`] position.
//!
//! - **Shared rules**: `Bitboard` implements [`Occupancy`](crate::core::Occupancy),
//!   so move generation and win detection are the same code the engine uses
//! - **Per-side rewards**: win 1, loss 0, draw or double win 0.5
//! - **Deterministic**: a fixed seed reproduces the same answer
//! - **Cancellable**: a shared flag stops a search between iterations
//!
//! ## Usage
//!
//! ```rust
//! use rust_loa::core::{Board, Side};
//! use rust_loa::mcts::{Bitboard, MCTSConfig, MCTSSearch};
//!
//! let root = Bitboard::new(&Board::initial(), Side::Black);
//! let mut search = MCTSSearch::new(MCTSConfig::default().with_iterations(100));
//!
//! if let Some(mv) = search.search(&root) {
//!     println!("Best move: {}", mv);
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod position;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{RandomSimulation, Rollout, SelectionPolicy, SimulationPolicy, UCB1};
pub use position::{Bitboard, GameResult};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};

use crate::core::{BoardSnapshot, Move, Side};

/// One-shot evaluation of a snapshot: the move the tree search picks for
/// `side`, or [`Move::NONE`] when it has none.
pub fn plain_solution(side: Side, snapshot: &BoardSnapshot, config: &MCTSConfig) -> Move {
    let root = Bitboard::new(snapshot, side);
    MCTSSearch::new(config.clone())
        .search(&root)
        .unwrap_or(Move::NONE)
}
