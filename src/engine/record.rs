//! Move history of one game.
//!
//! A record keeps the position its game started from, so games begun with
//! `start_from_position` replay as well as regular ones. Records serialize
//! with bincode and every move is re-validated on replay.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::event::Outcome;
use crate::core::{Board, BoardSnapshot, Move, PieceId, Side};
use crate::rules::{check_move, RuleViolation};

/// Encoding or decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RecordError {
    #[display("failed to encode game record: {}", message)]
    Encode { message: String },
    #[display("failed to decode game record: {}", message)]
    Decode { message: String },
}

/// A recorded move that does not replay.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("ply {} by {} ({}) is illegal: {}", ply, side, mv, reason)]
pub struct ReplayError {
    /// 1-based ply number.
    pub ply: u32,
    pub side: Side,
    pub mv: Move,
    pub reason: RuleViolation,
}

/// One applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based ply number.
    pub ply: u32,
    pub side: Side,
    pub mv: Move,
    /// Identity of the captured piece, if any.
    pub captured: Option<PieceId>,
}

/// Every move of a game, plus the outcome once known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position before the first move.
    pub start: BoardSnapshot,
    /// Side to move in `start`.
    pub first_to_move: Side,
    pub moves: Vec<MoveRecord>,
    pub outcome: Option<Outcome>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::from_position(&Board::initial(), Side::Black)
    }
}

impl GameRecord {
    /// An empty record of a game from the standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty record of a game starting from `board`.
    pub fn from_position(board: &Board, first_to_move: Side) -> Self {
        Self {
            start: board.snapshot(),
            first_to_move,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Append a move, numbering it.
    pub fn push(&mut self, side: Side, mv: Move, captured: Option<PieceId>) {
        let ply = self.moves.len() as u32 + 1;
        self.moves.push(MoveRecord {
            ply,
            side,
            mv,
            captured,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        bincode::serialize(self).map_err(|e| RecordError::Encode {
            message: e.to_string(),
        })
    }

    /// Decode a record produced by [`GameRecord::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        bincode::deserialize(bytes).map_err(|e| RecordError::Decode {
            message: e.to_string(),
        })
    }

    /// Rebuild the final board from the recorded starting position.
    ///
    /// Pieces are renumbered row-major, so ids may differ from the board
    /// that played the game.
    pub fn replay(&self) -> Result<Board, ReplayError> {
        let mut board = Board::from_snapshot(&self.start);
        for record in &self.moves {
            check_move(&board, record.side, record.mv).map_err(|reason| ReplayError {
                ply: record.ply,
                side: record.side,
                mv: record.mv,
                reason,
            })?;
            board.apply(record.mv);
        }
        Ok(board)
    }
}
