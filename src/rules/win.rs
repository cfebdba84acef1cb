//! Win detection.
//!
//! A side wins when the opponent is reduced to a single piece, or when all
//! of its own pieces (at least two) form one group under 8-neighbour
//! adjacency. Both sides can satisfy this after the same move.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Direction, Occupancy, Side, CELLS};

/// Result of checking both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinState {
    /// Nobody has won.
    None,
    /// Exactly one side has won.
    Single(Side),
    /// Both sides satisfy the win condition.
    Both,
}

/// Union-find over the 64 cells, rebuilt for every check.
struct DisjointSet {
    parent: [u8; CELLS],
}

impl DisjointSet {
    fn new() -> Self {
        let mut parent = [0u8; CELLS];
        for (i, p) in parent.iter_mut().enumerate() {
            *p = i as u8;
        }
        Self { parent }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }
        // Path compression.
        let mut cur = i;
        while self.parent[cur] as usize != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as u8;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb as u8;
        }
    }
}

/// Whether `side` satisfies the win condition.
pub fn check_win<B>(board: &B, side: Side) -> bool
where
    B: Occupancy + ?Sized,
{
    if board.count(side.opponent()) == 1 {
        return true;
    }

    let cells = board.cells_of(side);
    let Some(&first) = cells.first() else {
        return false;
    };
    if cells.len() < 2 {
        return false;
    }

    let mut set = DisjointSet::new();
    // Forward half of the neighbourhood covers every adjacent pair once.
    const FORWARD: [Direction; 4] = [Direction::E, Direction::S, Direction::SE, Direction::SW];
    for &at in &cells {
        for dir in FORWARD {
            if let Some(n) = at.step(dir, 1).filter(|&n| board.side_at(n) == Some(side)) {
                set.union(at.index(), n.index());
            }
        }
    }

    let root = set.find(first.index());
    cells.iter().all(|c: &Coord| set.find(c.index()) == root)
}

/// Check both sides at once.
pub fn evaluate<B>(board: &B) -> WinState
where
    B: Occupancy + ?Sized,
{
    match (check_win(board, Side::Black), check_win(board, Side::White)) {
        (true, true) => WinState::Both,
        (true, false) => WinState::Single(Side::Black),
        (false, true) => WinState::Single(Side::White),
        (false, false) => WinState::None,
    }
}
