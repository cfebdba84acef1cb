//! # rust-loa
//!
//! Rule engine and turn state machine for an 8x8 line-of-capture board game.
//!
//! ## Rules in brief
//!
//! Black and White start with twelve pieces each on the board edges, Black
//! moving first. A piece moves in a straight line (8 directions) exactly as
//! many cells as there are pieces on that whole line. It may jump its own
//! pieces, never an opponent's, and captures by landing on one. A side wins
//! when all of its pieces form one 8-connected group, or when the opponent
//! is down to a single piece.
//!
//! ## Architecture
//!
//! - **Occupancy-generic rules**: move legality and win detection are free
//!   functions over the [`Occupancy`] trait, shared by the engine board, bot
//!   snapshots and search bitboards.
//!
//! - **Synchronous engine, async driver**: [`TurnEngine`] owns every board
//!   mutation. [`GameDriver`] runs it in one tokio task and feeds it clock
//!   ticks and bot replies.
//!
//! - **Generation-guarded bots**: every bot request is tagged with the
//!   engine's generation counter; late replies are dropped.
//!
//! ## Modules
//!
//! - `core`: coordinates, sides, pieces, board, moves, RNG, configuration
//! - `rules`: move legality, enumeration and win detection
//! - `mcts`: Monte Carlo Tree Search over bitboards
//! - `bots`: the bot protocol, built-in bots and the registry
//! - `engine`: turn state machine, events, game records and the driver

pub mod bots;
pub mod core;
pub mod engine;
pub mod mcts;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardSnapshot, Coord, Direction, EngineConfig, GameRng, Move, Occupancy, Piece,
    PieceId, Side, SideMap,
};

pub use crate::rules::{
    check_move, check_win, count_along_line, destinations, enumerate_moves, evaluate,
    has_any_move, is_legal, RuleViolation, WinState,
};

pub use crate::mcts::{
    plain_solution, Bitboard, GameResult, MCTSConfig, MCTSSearch, RandomSimulation,
    SearchStats, UCB1,
};

pub use crate::bots::{Bot, BotContext, BotError, BotRegistry, MctsBot, RandomBot};

pub use crate::engine::{
    Controller, DriverHandle, GameDriver, GameEvent, GameRecord, Outcome, Phase, TurnEngine,
};
