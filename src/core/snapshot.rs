//! Flattened, immutable board view handed to bots.
//!
//! 64 integers, index `col + row * 8`; `-1` is an empty cell, otherwise
//! the owning side's id (`0` Black, `1` White).

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::board::{Board, Occupancy};
use super::coord::{Coord, CELLS};
use super::side::Side;

/// Value of an empty cell in a snapshot.
pub const EMPTY: i32 = -1;

/// Rejected snapshot input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    /// Not exactly 64 cells.
    #[display("snapshot must have 64 cells, got {}", len)]
    WrongLength {
        /// Cells supplied.
        len: usize,
    },
    /// A cell holds something other than -1, 0 or 1.
    #[display("invalid cell value {} at index {}", value, index)]
    InvalidCell {
        /// Offending flat index.
        index: usize,
        /// Offending value.
        value: i32,
    },
}

/// Immutable 64-cell occupancy list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct BoardSnapshot {
    cells: Vec<i32>,
}

impl BoardSnapshot {
    /// Capture any occupancy view.
    pub fn capture(board: &impl Occupancy) -> Self {
        let cells = Coord::all()
            .map(|c| board.side_at(c).map_or(EMPTY, Side::id))
            .collect();
        Self { cells }
    }

    /// Validate raw cells.
    pub fn from_cells(cells: &[i32]) -> Result<Self, SnapshotError> {
        if cells.len() != CELLS {
            return Err(SnapshotError::WrongLength { len: cells.len() });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, &v)| v != EMPTY && Side::from_id(v).is_none())
        {
            return Err(SnapshotError::InvalidCell { index, value });
        }
        Ok(Self {
            cells: cells.to_vec(),
        })
    }

    /// The raw cells.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }
}

impl Occupancy for BoardSnapshot {
    fn side_at(&self, at: Coord) -> Option<Side> {
        Side::from_id(self.cells[at.index()])
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self::capture(board)
    }
}

impl TryFrom<Vec<i32>> for BoardSnapshot {
    type Error = SnapshotError;

    fn try_from(cells: Vec<i32>) -> Result<Self, Self::Error> {
        Self::from_cells(&cells)
    }
}

impl From<BoardSnapshot> for Vec<i32> {
    fn from(snapshot: BoardSnapshot) -> Self {
        snapshot.cells
    }
}
