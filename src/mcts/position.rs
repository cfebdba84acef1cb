//! Compact search position.
//!
//! Two 64-bit occupancy masks plus the side to move. Copying a `Bitboard`
//! is a few words, so every search iteration and rollout works on its own
//! copy. Turn passing follows the engine: after a move the opponent moves
//! next only if it has a legal move, and a position where nobody can move
//! is a draw.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Move, Occupancy, Side, SideMap};
use crate::rules::{enumerate_moves, evaluate, has_any_move, WinState};

/// How a search position ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One side won.
    Winner(Side),
    /// Both sides met the win condition with the same move.
    BothWin,
    /// Neither side can move.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        match self {
            GameResult::Winner(s) => *s == side,
            GameResult::BothWin | GameResult::Draw => false,
        }
    }

    /// Per-side rewards: win 1, loss 0, shared outcomes 0.5.
    #[must_use]
    pub fn rewards(&self) -> SideMap<f64> {
        match self {
            GameResult::Winner(winner) => {
                SideMap::new(|side| if side == *winner { 1.0 } else { 0.0 })
            }
            GameResult::BothWin | GameResult::Draw => SideMap::with_value(0.5),
        }
    }
}

/// Bitboard position used by the tree search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitboard {
    bits: [u64; 2],
    to_move: Side,
    result: Option<GameResult>,
}

impl Bitboard {
    /// Capture any board view with `to_move` to play.
    pub fn new(board: &impl Occupancy, to_move: Side) -> Self {
        let mut bits = [0u64; 2];
        for at in Coord::all() {
            if let Some(side) = board.side_at(at) {
                bits[side.index()] |= at.bit();
            }
        }
        let mut position = Self {
            bits,
            to_move,
            result: None,
        };
        position.result = position.settle();
        position
    }

    /// Side to move.
    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// The final result, once the position is terminal.
    #[inline]
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    /// Raw occupancy mask of `side`.
    #[must_use]
    pub fn mask(&self, side: Side) -> u64 {
        self.bits[side.index()]
    }

    /// Legal moves of the side to move. Empty once terminal.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        enumerate_moves(self, self.to_move)
    }

    /// Play a move the caller knows to be legal, then settle the turn.
    pub fn play(&mut self, mv: Move) {
        let (Some(from), Some(to)) = (mv.origin(), mv.destination()) else {
            return;
        };
        let me = self.to_move.index();
        let them = self.to_move.opponent().index();
        self.bits[me] &= !from.bit();
        self.bits[me] |= to.bit();
        self.bits[them] &= !to.bit();

        self.result = self.settle();
        if self.result.is_none() && has_any_move(self, self.to_move.opponent()) {
            self.to_move = self.to_move.opponent();
        }
    }

    fn settle(&self) -> Option<GameResult> {
        match evaluate(self) {
            WinState::Single(side) => Some(GameResult::Winner(side)),
            WinState::Both => Some(GameResult::BothWin),
            WinState::None => {
                if has_any_move(self, Side::Black) || has_any_move(self, Side::White) {
                    None
                } else {
                    Some(GameResult::Draw)
                }
            }
        }
    }
}

impl Occupancy for Bitboard {
    #[inline]
    fn side_at(&self, at: Coord) -> Option<Side> {
        let bit = at.bit();
        if self.bits[0] & bit != 0 {
            Some(Side::Black)
        } else if self.bits[1] & bit != 0 {
            Some(Side::White)
        } else {
            None
        }
    }

    fn count(&self, side: Side) -> usize {
        self.bits[side.index()].count_ones() as usize
    }
}
