//! Bot protocol and the built-in bots.
//!
//! ## Protocol
//!
//! A bot is asked for a move with an immutable [`BoardSnapshot`] and replies
//! asynchronously. The engine tags every request with a generation counter
//! and throws away replies that arrive after the game moved on, so a bot
//! never needs to know about restarts or timeouts.
//!
//! ## Built-in bots
//!
//! - [`RandomBot`]: uniform choice among legal moves
//! - [`MctsBot`]: the tree-search evaluator, run on a blocking thread
//!
//! Both are registered by [`BotRegistry::with_defaults`].

mod mcts;
mod random;
mod registry;

pub use mcts::MctsBot;
pub use random::RandomBot;
pub use registry::{BotContext, BotFactory, BotRegistry};

use derive_more::{Display, Error};

use crate::core::{BoardSnapshot, Move, Side};

/// Why a bot produced no usable move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BotError {
    /// The bot found no legal move for its side.
    #[display("{} has no legal move", side)]
    NoMove {
        /// The bot's side.
        side: Side,
    },
    /// The bot failed internally.
    #[display("bot failed: {}", message)]
    Failed {
        /// What went wrong.
        message: String,
    },
    /// The bot did not answer within the hard timeout.
    #[display("bot timed out after {} ms", millis)]
    Timeout {
        /// The timeout that expired.
        millis: u64,
    },
    /// The blocking search task panicked or was cancelled.
    #[display("bot task ended abnormally: {}", message)]
    Join {
        /// Join error text.
        message: String,
    },
}

/// A computer player bound to one side.
#[async_trait::async_trait]
pub trait Bot: Send + Sync {
    /// The side this bot plays.
    fn side(&self) -> Side;

    /// Display name.
    fn name(&self) -> &str;

    /// Choose a move for [`Bot::side`] on `snapshot`.
    ///
    /// A bot with no legal move returns `Err(BotError::NoMove)` or
    /// `Ok(Move::NONE)`; the engine treats both as an illegal move.
    async fn make_move(&self, snapshot: BoardSnapshot) -> Result<Move, BotError>;
}
