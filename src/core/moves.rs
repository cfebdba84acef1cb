//! The move value exchanged between engine, bots and collaborators.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// A move from `(x0, y0)` to `(x1, y1)`.
///
/// Components are signed and unchecked so that anything a bot or a user
/// sends can be represented and then rejected by the rules. `Move::NONE`
/// (all `-1`) means "no move".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Move {
    /// The "no move" sentinel.
    pub const NONE: Move = Move::new(-1, -1, -1, -1);

    #[must_use]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a move between two on-board cells.
    #[must_use]
    pub const fn between(from: Coord, to: Coord) -> Self {
        Self::new(from.x(), from.y(), to.x(), to.y())
    }

    /// Whether this is the `NONE` sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Move::NONE
    }

    /// Origin cell, if on the board.
    #[must_use]
    pub const fn origin(&self) -> Option<Coord> {
        Coord::try_new(self.x0, self.y0)
    }

    /// Destination cell, if on the board.
    #[must_use]
    pub const fn destination(&self) -> Option<Coord> {
        Coord::try_new(self.x1, self.y1)
    }

    /// Displacement `(x1 - x0, y1 - y0)`.
    #[must_use]
    pub const fn delta(&self) -> (i32, i32) {
        (self.x1 - self.x0, self.y1 - self.y0)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) -> ({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

impl From<[i32; 4]> for Move {
    fn from([x0, y0, x1, y1]: [i32; 4]) -> Self {
        Move::new(x0, y0, x1, y1)
    }
}

impl From<Move> for [i32; 4] {
    fn from(mv: Move) -> Self {
        [mv.x0, mv.y0, mv.x1, mv.y1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel() {
        assert!(Move::NONE.is_none());
        assert!(Move::default().is_none());
        assert!(Move::NONE.origin().is_none());
        assert!(!Move::new(0, 0, 1, 1).is_none());
    }

    #[test]
    fn test_endpoints() {
        let mv = Move::new(1, 0, 1, 2);
        assert_eq!(mv.origin(), Coord::try_new(1, 0));
        assert_eq!(mv.destination(), Coord::try_new(1, 2));
        assert_eq!(mv.delta(), (0, 2));

        let off = Move::new(7, 7, 8, 8);
        assert!(off.origin().is_some());
        assert!(off.destination().is_none());
    }

    #[test]
    fn test_display_and_array() {
        let mv = Move::from([3, 4, 5, 6]);
        assert_eq!(format!("{}", mv), "(3, 4) -> (5, 6)");
        assert_eq!(<[i32; 4]>::from(mv), [3, 4, 5, 6]);
    }
}
