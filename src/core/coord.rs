//! Board coordinates and the eight line directions.
//!
//! `x` is the column and `y` the row; row 0 is the top edge, so "south"
//! means increasing `y`. The flat index used by snapshots is `x + 8 * y`.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Board width and height.
pub const DIM: i32 = 8;

/// Number of cells on the board.
pub const CELLS: usize = (DIM * DIM) as usize;

/// A cell on the 8x8 board. Always in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// Bounds-checked construction from signed components.
    ///
    /// ```
    /// use rust_loa::core::Coord;
    ///
    /// assert!(Coord::try_new(7, 0).is_some());
    /// assert!(Coord::try_new(8, 0).is_none());
    /// assert!(Coord::try_new(0, -1).is_none());
    /// ```
    #[must_use]
    pub const fn try_new(x: i32, y: i32) -> Option<Coord> {
        if x < 0 || y < 0 || x >= DIM || y >= DIM {
            None
        } else {
            Some(Coord {
                x: x as u8,
                y: y as u8,
            })
        }
    }

    /// Coordinate for a flat index in `0..64`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Coord> {
        if index >= CELLS {
            None
        } else {
            Some(Coord {
                x: (index % DIM as usize) as u8,
                y: (index / DIM as usize) as u8,
            })
        }
    }

    /// Column.
    #[inline]
    #[must_use]
    pub const fn x(self) -> i32 {
        self.x as i32
    }

    /// Row.
    #[inline]
    #[must_use]
    pub const fn y(self) -> i32 {
        self.y as i32
    }

    /// Flat index `x + 8 * y`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.x as usize + self.y as usize * DIM as usize
    }

    /// Single-bit mask for bitboards.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// The coordinate `steps` cells away in `dir`, if still on the board.
    #[must_use]
    pub const fn step(self, dir: Direction, steps: i32) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        Coord::try_new(self.x() + dx * steps, self.y() + dy * steps)
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS).filter_map(Coord::from_index)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight-line direction.
///
/// Declaration order is the probing order used by move enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Direction {
    E,
    W,
    S,
    N,
    SE,
    NW,
    NE,
    SW,
}

impl Direction {
    /// All directions in probing order.
    pub const ALL: [Direction; 8] = [
        Direction::E,
        Direction::W,
        Direction::S,
        Direction::N,
        Direction::SE,
        Direction::NW,
        Direction::NE,
        Direction::SW,
    ];

    /// Unit step `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
            Direction::S => (0, 1),
            Direction::N => (0, -1),
            Direction::SE => (1, 1),
            Direction::NW => (-1, -1),
            Direction::NE => (1, -1),
            Direction::SW => (-1, 1),
        }
    }

    /// The direction of a unit step, if it is one of the eight.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}
