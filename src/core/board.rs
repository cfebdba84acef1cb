//! The 8x8 board and the `Occupancy` view shared by every position type.
//!
//! `Board` is the engine's authoritative board: it owns every `Piece` and
//! keeps each piece's `cell` back-reference in sync with the cell holding
//! it. The rules in [`crate::rules`] only need to know which side occupies
//! a cell, so they are written against the [`Occupancy`] trait and work
//! unchanged on `Board`, on bot snapshots and on search bitboards.

use super::coord::{Coord, CELLS, DIM};
use super::moves::Move;
use super::piece::{Piece, PieceId};
use super::side::Side;
use super::snapshot::BoardSnapshot;

/// Read-only view of which side occupies each cell.
pub trait Occupancy {
    /// The owner of the piece at `at`, if any.
    fn side_at(&self, at: Coord) -> Option<Side>;

    /// Signed lookup. Out-of-range coordinates are simply empty.
    fn side_at_xy(&self, x: i32, y: i32) -> Option<Side> {
        Coord::try_new(x, y).and_then(|c| self.side_at(c))
    }

    /// Whether any piece sits at `at`.
    fn is_occupied(&self, at: Coord) -> bool {
        self.side_at(at).is_some()
    }

    /// Cells holding pieces of `side`, row-major.
    fn cells_of(&self, side: Side) -> Vec<Coord> {
        Coord::all().filter(|&c| self.side_at(c) == Some(side)).collect()
    }

    /// Number of pieces of `side`.
    fn count(&self, side: Side) -> usize {
        Coord::all().filter(|&c| self.side_at(c) == Some(side)).count()
    }
}

/// The game board: 64 cells, each holding at most one piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
            next_id: 0,
        }
    }

    /// The starting position.
    ///
    /// Black holds row 0 and row 7, White holds column 0 and column 7, the
    /// four corners stay empty. Twelve pieces per side.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for c in Coord::all() {
            let edge_row = c.y() == 0 || c.y() == DIM - 1;
            let edge_col = c.x() == 0 || c.x() == DIM - 1;
            match (edge_row, edge_col) {
                (true, false) => {
                    board.spawn(c, Side::Black);
                }
                (false, true) => {
                    board.spawn(c, Side::White);
                }
                _ => {}
            }
        }
        board
    }

    /// Rebuild a board from a snapshot. Pieces get fresh ids, row-major.
    #[must_use]
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let mut board = Self::empty();
        for c in Coord::all() {
            if let Some(side) = snapshot.side_at(c) {
                board.spawn(c, side);
            }
        }
        board
    }

    /// Create a new piece for `owner` at `at`, replacing any occupant.
    pub fn spawn(&mut self, at: Coord, owner: Side) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        self.cells[at.index()] = Some(Piece::new(id, owner, at));
        id
    }

    /// Bounds-checked lookup. Never fails for out-of-range input.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Piece> {
        Coord::try_new(x, y).and_then(|c| self.at(c))
    }

    /// The piece at `at`, if any.
    #[inline]
    #[must_use]
    pub fn at(&self, at: Coord) -> Option<&Piece> {
        self.cells[at.index()].as_ref()
    }

    /// Put `piece` on `at` and return the displaced occupant, if any.
    ///
    /// If `piece` is currently on the board it is lifted from its old cell
    /// first, so a piece is never held by two cells.
    pub fn place(&mut self, at: Coord, mut piece: Piece) -> Option<Piece> {
        let old = piece.cell();
        if old != at && self.cells[old.index()].map(|p| p.id()) == Some(piece.id()) {
            self.cells[old.index()] = None;
        }
        piece.set_cell(at);
        let displaced = self.cells[at.index()].replace(piece);
        displaced.filter(|p| p.id() != piece.id())
    }

    /// Remove and return the piece at `at`.
    pub fn clear(&mut self, at: Coord) -> Option<Piece> {
        self.cells[at.index()].take()
    }

    /// Move the piece on `from` to `to`, returning the captured piece.
    ///
    /// No legality check happens here; see [`crate::rules::check_move`].
    /// An empty origin leaves the board untouched.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let piece = self.clear(from)?;
        self.place(to, piece)
    }

    /// Apply `mv` without checking legality, returning the captured piece.
    ///
    /// Moves with an off-board endpoint leave the board untouched.
    pub fn apply(&mut self, mv: Move) -> Option<Piece> {
        let (from, to) = (mv.origin()?, mv.destination()?);
        self.move_piece(from, to)
    }

    /// Visit every piece of `side` in row-major order.
    pub fn for_each_piece(&self, side: Side, mut f: impl FnMut(&Piece)) {
        for piece in self.pieces(side) {
            f(piece);
        }
    }

    /// Pieces of `side` in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.cells
            .iter()
            .flatten()
            .filter(move |p| p.owner() == side)
    }

    /// Total number of pieces on the board.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Flattened snapshot for bots.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(self)
    }
}

impl Occupancy for Board {
    #[inline]
    fn side_at(&self, at: Coord) -> Option<Side> {
        self.at(at).map(Piece::owner)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for y in 0..DIM {
            write!(f, "{}", y)?;
            for x in 0..DIM {
                let ch = match self.side_at_xy(x, y) {
                    Some(Side::Black) => 'B',
                    Some(Side::White) => 'W',
                    None => '.',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::try_new(x, y).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(board.count(Side::Black), 12);
        assert_eq!(board.count(Side::White), 12);
        assert_eq!(board.total(), 24);

        assert_eq!(board.side_at(c(1, 0)), Some(Side::Black));
        assert_eq!(board.side_at(c(6, 7)), Some(Side::Black));
        assert_eq!(board.side_at(c(0, 1)), Some(Side::White));
        assert_eq!(board.side_at(c(7, 6)), Some(Side::White));

        for corner in [c(0, 0), c(7, 0), c(0, 7), c(7, 7)] {
            assert!(board.at(corner).is_none());
        }
    }

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let board = Board::initial();
        assert!(board.get(-1, 0).is_none());
        assert!(board.get(0, 8).is_none());
        assert!(board.get(100, -100).is_none());
        assert!(board.get(1, 0).is_some());
    }

    #[test]
    fn test_back_reference_follows_moves() {
        let mut board = Board::empty();
        let id = board.spawn(c(2, 2), Side::Black);

        assert!(board.move_piece(c(2, 2), c(2, 5)).is_none());

        let piece = board.at(c(2, 5)).unwrap();
        assert_eq!(piece.id(), id);
        assert_eq!(piece.cell(), c(2, 5));
        assert!(board.at(c(2, 2)).is_none());
    }

    #[test]
    fn test_capture_returns_victim() {
        let mut board = Board::empty();
        board.spawn(c(0, 0), Side::Black);
        let victim = board.spawn(c(3, 0), Side::White);

        let captured = board.move_piece(c(0, 0), c(3, 0)).unwrap();
        assert_eq!(captured.id(), victim);
        assert_eq!(board.count(Side::White), 0);
        assert_eq!(board.total(), 1);
    }

    #[test]
    fn test_place_lifts_piece_from_old_cell() {
        let mut board = Board::empty();
        board.spawn(c(1, 1), Side::White);
        let piece = *board.at(c(1, 1)).unwrap();

        assert!(board.place(c(4, 4), piece).is_none());
        assert!(board.at(c(1, 1)).is_none());
        assert_eq!(board.at(c(4, 4)).unwrap().cell(), c(4, 4));
        assert_eq!(board.total(), 1);
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::initial();
        assert!(board.apply(Move::new(1, 0, 1, 2)).is_none());
        assert_eq!(board.side_at(c(1, 2)), Some(Side::Black));

        let before = board.clone();
        assert!(board.apply(Move::new(1, 2, 1, 9)).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_from_empty_is_noop() {
        let mut board = Board::initial();
        let before = board.clone();
        assert!(board.move_piece(c(3, 3), c(3, 4)).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_for_each_piece_row_major() {
        let board = Board::initial();
        let mut seen = Vec::new();
        board.for_each_piece(Side::White, |p| seen.push(p.cell()));

        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0], c(0, 1));
        assert_eq!(seen[1], c(7, 1));
        assert_eq!(seen[2], c(0, 2));
    }

    #[test]
    fn test_ids_are_unique() {
        let board = Board::initial();
        let mut ids: Vec<_> = Side::BOTH
            .iter()
            .flat_map(|&s| board.pieces(s).map(|p| p.id()))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 24);
    }

    #[test]
    fn test_display() {
        let text = format!("{}", Board::initial());
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows[1], "0 . B B B B B B .");
        assert_eq!(rows[2], "1 W . . . . . . W");
    }
}
