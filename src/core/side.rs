//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two colours of the game. Black always moves first.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for clocks, controllers
//! and search rewards.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::{Display, EnumIter};

/// One of the two players.
///
/// The numeric id (`Black = 0`, `White = 1`) is the value used in board
/// snapshots handed to bots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Side {
    /// Moves first; starts on the top and bottom rows.
    Black,
    /// Starts on the left and right columns.
    White,
}

impl Side {
    /// Both sides, Black first.
    pub const BOTH: [Side; 2] = [Side::Black, Side::White];

    /// Snapshot id of this side.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }

    /// Index into per-side storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.id() as usize
    }

    /// Parse a snapshot id. Anything other than `0` or `1` is `None`.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Side> {
        match id {
            0 => Some(Side::Black),
            1 => Some(Side::White),
            _ => None,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// One value per side with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_loa::core::{Side, SideMap};
///
/// let mut clocks: SideMap<f64> = SideMap::with_value(0.0);
/// clocks[Side::White] += 1.5;
/// assert_eq!(clocks[Side::Black], 0.0);
/// assert_eq!(clocks[Side::White], 1.5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Black), factory(Side::White)],
        }
    }

    /// Create a map from explicit Black and White values.
    pub fn from_pair(black: T, white: T) -> Self {
        Self {
            data: [black, white],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, Black first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Transform each entry.
    pub fn map<U>(&self, f: impl Fn(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Black.id(), 0);
        assert_eq!(Side::White.id(), 1);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(format!("{}", Side::Black), "Black");
    }

    #[test]
    fn test_side_from_id() {
        assert_eq!(Side::from_id(0), Some(Side::Black));
        assert_eq!(Side::from_id(1), Some(Side::White));
        assert_eq!(Side::from_id(-1), None);
        assert_eq!(Side::from_id(2), None);
    }

    #[test]
    fn test_side_iter_order() {
        let sides: Vec<_> = Side::iter().collect();
        assert_eq!(sides, Side::BOTH.to_vec());
    }

    #[test]
    fn test_side_map_new() {
        let map = SideMap::new(|s| s.id() * 10);
        assert_eq!(map[Side::Black], 0);
        assert_eq!(map[Side::White], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map = SideMap::with_value(0);
        map[Side::Black] = 3;
        *map.get_mut(Side::White) += 4;

        assert_eq!(map[Side::Black], 3);
        assert_eq!(map[Side::White], 4);
    }

    #[test]
    fn test_side_map_iter_and_map() {
        let map = SideMap::from_pair("b", "w");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Black, &"b"), (Side::White, &"w")]);

        let lens = map.map(|_, s| s.len());
        assert_eq!(lens, SideMap::with_value(1));
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::from_pair(1.25f64, 2.5);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
