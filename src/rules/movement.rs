//! Line-of-capture movement.
//!
//! A piece moves in a straight line (orthogonal or diagonal) exactly as
//! many cells as there are pieces, of either side, on the whole board line
//! it moves along. It may jump its own pieces but not the opponent's, and
//! captures by landing on an opposing piece.
//!
//! ## Enumeration order
//!
//! [`enumerate_moves`] visits source pieces row-major and probes directions
//! in [`Direction::ALL`] order. Bots that pick "the first legal move" rely
//! on this order being stable.

use derive_more::{Display, Error};
use smallvec::SmallVec;

use crate::core::{Coord, Direction, Move, Occupancy, Side};

/// The first legality clause a move fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum RuleViolation {
    /// An endpoint lies outside the board.
    #[display("move leaves the board")]
    OffBoard,
    /// Not a non-zero horizontal, vertical or diagonal displacement.
    #[display("displacement ({}, {}) is not a straight line", dx, dy)]
    NotALine {
        /// Column displacement.
        dx: i32,
        /// Row displacement.
        dy: i32,
    },
    /// Distance differs from the number of pieces on the line.
    #[display("moved {} cells but the line holds {} pieces", distance, required)]
    WrongDistance {
        /// Cells travelled.
        distance: i32,
        /// Pieces on the line.
        required: i32,
    },
    /// The origin does not hold a piece of the moving side.
    #[display("no own piece at the origin")]
    NotOwnPiece,
    /// The destination holds a piece of the moving side.
    #[display("destination holds an own piece")]
    OwnPieceAtDestination,
    /// An opposing piece sits strictly between origin and destination.
    #[display("path blocked by an opposing piece at {}", at)]
    Blocked {
        /// The blocking cell.
        at: Coord,
    },
}

/// Count occupied cells on the board line through `(x0, y0)` with step
/// `(dx, dy)`, in both directions, origin included.
///
/// A zero step, or an origin off the board, counts nothing.
pub fn count_along_line<B>(board: &B, x0: i32, y0: i32, dx: i32, dy: i32) -> usize
where
    B: Occupancy + ?Sized,
{
    if (dx, dy) == (0, 0) || Coord::try_new(x0, y0).is_none() {
        return 0;
    }

    let mut count = usize::from(board.side_at_xy(x0, y0).is_some());
    for sign in [1, -1] {
        let (sx, sy) = (dx * sign, dy * sign);
        let (mut x, mut y) = (x0 + sx, y0 + sy);
        while let Some(at) = Coord::try_new(x, y) {
            if board.is_occupied(at) {
                count += 1;
            }
            x += sx;
            y += sy;
        }
    }
    count
}

/// Check `mv` for `side`, naming the first clause it fails.
pub fn check_move<B>(board: &B, side: Side, mv: Move) -> Result<(), RuleViolation>
where
    B: Occupancy + ?Sized,
{
    let (Some(from), Some(to)) = (mv.origin(), mv.destination()) else {
        return Err(RuleViolation::OffBoard);
    };

    let (dx, dy) = mv.delta();
    let straight = dx == 0 || dy == 0 || dx.abs() == dy.abs();
    let Some(dir) = Direction::from_delta(dx.signum(), dy.signum()).filter(|_| straight) else {
        return Err(RuleViolation::NotALine { dx, dy });
    };

    let distance = dx.abs().max(dy.abs());
    let (sx, sy) = dir.delta();
    let required = count_along_line(board, from.x(), from.y(), sx, sy) as i32;
    if distance != required {
        return Err(RuleViolation::WrongDistance { distance, required });
    }

    if board.side_at(from) != Some(side) {
        return Err(RuleViolation::NotOwnPiece);
    }
    if board.side_at(to) == Some(side) {
        return Err(RuleViolation::OwnPieceAtDestination);
    }

    let opponent = side.opponent();
    for at in (1..distance).filter_map(|i| from.step(dir, i)) {
        if board.side_at(at) == Some(opponent) {
            return Err(RuleViolation::Blocked { at });
        }
    }

    Ok(())
}

/// Whether `mv` is legal for `side`.
#[inline]
pub fn is_legal<B>(board: &B, side: Side, mv: Move) -> bool
where
    B: Occupancy + ?Sized,
{
    check_move(board, side, mv).is_ok()
}

/// Legal destinations of the piece at `from`, in direction probing order.
///
/// Empty when `from` does not hold a piece of `side`.
pub fn destinations<B>(board: &B, side: Side, from: Coord) -> SmallVec<[Coord; 8]>
where
    B: Occupancy + ?Sized,
{
    let mut out = SmallVec::new();
    if board.side_at(from) != Some(side) {
        return out;
    }
    for dir in Direction::ALL {
        let (dx, dy) = dir.delta();
        let steps = count_along_line(board, from.x(), from.y(), dx, dy) as i32;
        if let Some(to) = from.step(dir, steps) {
            if is_legal(board, side, Move::between(from, to)) {
                out.push(to);
            }
        }
    }
    out
}

/// Every legal move of `side`: sources row-major, directions in probing order.
pub fn enumerate_moves<B>(board: &B, side: Side) -> Vec<Move>
where
    B: Occupancy + ?Sized,
{
    board
        .cells_of(side)
        .into_iter()
        .flat_map(|from| {
            destinations(board, side, from)
                .into_iter()
                .map(move |to| Move::between(from, to))
        })
        .collect()
}

/// Whether `side` has at least one legal move.
pub fn has_any_move<B>(board: &B, side: Side) -> bool
where
    B: Occupancy + ?Sized,
{
    board
        .cells_of(side)
        .into_iter()
        .any(|from| !destinations(board, side, from).is_empty())
}
