//! Pieces and their identity.
//!
//! Every piece created on a board gets a `PieceId` that is never reused
//! for the lifetime of that board, so collaborators can track a piece
//! across moves and notice when it is captured.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::side::Side;

/// Stable identity of a piece on one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A piece on the board.
///
/// `id` and `owner` never change. `cell` is the back-reference to the cell
/// holding the piece and is maintained by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    owner: Side,
    cell: Coord,
}

impl Piece {
    pub(crate) const fn new(id: PieceId, owner: Side, cell: Coord) -> Self {
        Self { id, owner, cell }
    }

    /// Stable identity.
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// The side this piece belongs to.
    #[must_use]
    pub const fn owner(&self) -> Side {
        self.owner
    }

    /// The cell currently holding this piece.
    #[must_use]
    pub const fn cell(&self) -> Coord {
        self.cell
    }

    pub(crate) fn set_cell(&mut self, cell: Coord) {
        self.cell = cell;
    }
}
