//! Rule integration tests: movement, enumeration and win detection.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_loa::core::{Board, BoardSnapshot, Coord, Move, Occupancy, Side};
use rust_loa::rules::{
    check_move, check_win, count_along_line, enumerate_moves, evaluate, has_any_move, is_legal,
    RuleViolation, WinState,
};

fn c(x: i32, y: i32) -> Coord {
    Coord::try_new(x, y).unwrap()
}

fn board_with(black: &[(i32, i32)], white: &[(i32, i32)]) -> Board {
    let mut board = Board::empty();
    for &(x, y) in black {
        board.spawn(c(x, y), Side::Black);
    }
    for &(x, y) in white {
        board.spawn(c(x, y), Side::White);
    }
    board
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_initial_board_has_moves() {
    let board = Board::initial();
    assert!(has_any_move(&board, Side::Black));
    assert!(has_any_move(&board, Side::White));
    assert_eq!(enumerate_moves(&board, Side::Black).len(), 36);
    assert_eq!(evaluate(&board), WinState::None);
}

#[test]
fn test_opponent_down_to_one_piece() {
    let board = board_with(&[(0, 0), (5, 5), (7, 0)], &[(3, 3)]);

    assert!(check_win(&board, Side::Black));
    assert!(!check_win(&board, Side::White));
    assert_eq!(evaluate(&board), WinState::Single(Side::Black));
}

#[test]
fn test_connected_chain_wins() {
    let white = [(0, 7), (7, 0)];

    let chain = board_with(&[(2, 2), (3, 3), (4, 3)], &white);
    assert!(check_win(&chain, Side::Black));

    let split = board_with(&[(2, 2), (3, 3), (6, 6)], &white);
    assert!(!check_win(&split, Side::Black));
}

#[test]
fn test_blocked_diagonal_rejected() {
    let board = board_with(
        &[(0, 0), (1, 1), (2, 2), (4, 4), (5, 5), (6, 6)],
        &[(3, 3), (7, 0)],
    );
    let before = board.clone();

    assert_eq!(count_along_line(&board, 0, 0, 1, 1), 7);
    assert_eq!(
        check_move(&board, Side::Black, Move::new(0, 0, 7, 7)),
        Err(RuleViolation::Blocked { at: c(3, 3) })
    );
    assert_eq!(board, before);
}

#[test]
fn test_clause_order() {
    let board = Board::initial();

    // Off-board beats everything else.
    assert_eq!(
        check_move(&board, Side::White, Move::new(-1, 0, 1, 0)),
        Err(RuleViolation::OffBoard)
    );
    // A knight jump from an empty cell is a shape problem first.
    assert_eq!(
        check_move(&board, Side::Black, Move::new(3, 3, 4, 5)),
        Err(RuleViolation::NotALine { dx: 1, dy: 2 })
    );
    // Right distance, wrong owner.
    assert_eq!(
        check_move(&board, Side::White, Move::new(1, 0, 1, 2)),
        Err(RuleViolation::NotOwnPiece)
    );
}

#[test]
fn test_capture_removes_one_piece() {
    let mut board = board_with(&[(2, 2), (0, 0)], &[(4, 2), (7, 7)]);
    let mv = Move::new(2, 2, 4, 2);
    assert!(is_legal(&board, Side::Black, mv));

    let captured = board.apply(mv).unwrap();
    assert_eq!(captured.owner(), Side::White);
    assert_eq!(board.count(Side::White), 1);
    assert_eq!(board.total(), 3);
}

#[test]
fn test_snapshot_and_board_agree() {
    let board = Board::initial();
    let snapshot = board.snapshot();

    for side in Side::BOTH {
        assert_eq!(enumerate_moves(&board, side), enumerate_moves(&snapshot, side));
        assert_eq!(check_win(&board, side), check_win(&snapshot, side));
    }
}

// =============================================================================
// Properties
// =============================================================================

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(prop_oneof![4 => Just(-1), 1 => Just(0), 1 => Just(1)], 64)
        .prop_map(|cells| Board::from_snapshot(&BoardSnapshot::from_cells(&cells).unwrap()))
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Black), Just(Side::White)]
}

proptest! {
    #[test]
    fn prop_enumeration_matches_legality(board in arb_board(), side in arb_side()) {
        let enumerated = enumerate_moves(&board, side);
        let unique: HashSet<Move> = enumerated.iter().copied().collect();
        prop_assert_eq!(unique.len(), enumerated.len());

        for mv in &enumerated {
            prop_assert!(is_legal(&board, side, *mv));
        }

        let mut legal = HashSet::new();
        for from in Coord::all() {
            for to in Coord::all() {
                let mv = Move::between(from, to);
                if is_legal(&board, side, mv) {
                    legal.insert(mv);
                }
            }
        }
        prop_assert_eq!(legal, unique);
        prop_assert_eq!(has_any_move(&board, side), !enumerated.is_empty());
    }

    #[test]
    fn prop_moves_conserve_pieces(board in arb_board(), side in arb_side()) {
        let total = board.total();
        for mv in enumerate_moves(&board, side) {
            let mut after = board.clone();
            let captured = after.apply(mv);

            let expected = if captured.is_some() { total - 1 } else { total };
            prop_assert_eq!(after.total(), expected);
            prop_assert_eq!(after.count(side), board.count(side));
            prop_assert_eq!(after.side_at_xy(mv.x1, mv.y1), Some(side));
        }
    }

    #[test]
    fn prop_win_check_is_stable(board in arb_board()) {
        let first = evaluate(&board);
        prop_assert_eq!(evaluate(&board.clone()), first);
        prop_assert_eq!(evaluate(&board.snapshot()), first);
    }
}
