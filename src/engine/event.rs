//! Notifications for collaborators (renderer, status bar, timer display).

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::{Coord, Move, PieceId, Side};
use crate::rules::RuleViolation;

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// One side met the win condition.
    #[display("{} wins", _0)]
    Win(Side),
    /// Both sides met the win condition with the same move.
    #[display("both sides win")]
    BothWin,
    /// Neither side can move.
    #[display("draw")]
    Draw,
    /// A bot submitted an illegal move or failed to produce one.
    #[display("{} forfeits with an illegal move", loser)]
    ForfeitIllegalMove {
        /// The forfeiting side.
        loser: Side,
    },
    /// The step clock ran out.
    #[display("{} loses on time", loser)]
    ForfeitTimeout {
        /// The side that ran out of time.
        loser: Side,
    },
}

impl Outcome {
    /// The single winning side, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match *self {
            Outcome::Win(side) => Some(side),
            Outcome::ForfeitIllegalMove { loser } | Outcome::ForfeitTimeout { loser } => {
                Some(loser.opponent())
            }
            Outcome::BothWin | Outcome::Draw => None,
        }
    }
}

/// Something collaborators should react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A new game began.
    Started {
        /// Generation of the new game.
        generation: u64,
    },
    /// The side to move is (still) `side`.
    TurnChanged {
        side: Side,
        /// Status-bar text.
        label: String,
    },
    /// Seconds left on the step clock.
    StepClockTick { remaining: u32 },
    /// Cumulative thinking time of the side to move, this turn included.
    GameClockTick { side: Side, elapsed: f64 },
    /// The board changed; `last_move` is `None` on reset.
    BoardChanged {
        last_move: Option<Move>,
        captured: Option<PieceId>,
    },
    /// `side` has no legal move; the other side moves again.
    NoMoves { side: Side },
    /// The game ended.
    GameOver(Outcome),
    /// A human move was refused.
    IllegalMoveRejected { mv: Move, reason: RuleViolation },
    /// Human selection changed; `at` is `None` when cleared.
    Selected {
        at: Option<Coord>,
        candidates: Vec<Coord>,
    },
}

/// Game clock text with two decimals, as shown next to each side.
#[must_use]
pub fn format_clock(elapsed: f64) -> String {
    format!("{:.2}", elapsed)
}
