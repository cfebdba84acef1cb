//! Core types: coordinates, sides, pieces, the board, moves, RNG, configuration.
//!
//! Everything here is independent of the rules and of the turn engine; the
//! move and win rules in [`crate::rules`] are written against [`Occupancy`].

pub mod board;
pub mod config;
pub mod coord;
pub mod moves;
pub mod piece;
pub mod rng;
pub mod side;
pub mod snapshot;

pub use board::{Board, Occupancy};
pub use config::{ConfigError, EngineConfig};
pub use coord::{Coord, Direction, CELLS, DIM};
pub use moves::Move;
pub use piece::{Piece, PieceId};
pub use rng::GameRng;
pub use side::{Side, SideMap};
pub use snapshot::{BoardSnapshot, SnapshotError, EMPTY};
