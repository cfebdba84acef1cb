//! Game rules: line-of-capture movement and win detection.
//!
//! Both are free functions over any [`Occupancy`](crate::core::Occupancy)
//! so the engine board, bot snapshots and search bitboards share one
//! implementation.

pub mod movement;
pub mod win;

pub use movement::{
    check_move, count_along_line, destinations, enumerate_moves, has_any_move, is_legal,
    RuleViolation,
};
pub use win::{check_win, evaluate, WinState};
