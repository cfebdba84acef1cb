//! Turn engine integration tests: turn order, skips, outcomes and records.

use std::sync::Arc;

use rust_loa::bots::{BotError, RandomBot};
use rust_loa::core::{Board, Coord, EngineConfig, GameRng, Move, Occupancy, Side, SideMap};
use rust_loa::engine::{
    BotReply, Controller, GameEvent, GameRecord, Outcome, Phase, SubmitError, TurnEngine,
};
use rust_loa::rules::RuleViolation;

fn c(x: i32, y: i32) -> Coord {
    Coord::try_new(x, y).unwrap()
}

/// Rows top to bottom; `b` Black, `w` White, anything else empty.
fn board_from(rows: &[&str]) -> Board {
    let mut board = Board::empty();
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            let side = match cell {
                'b' => Side::Black,
                'w' => Side::White,
                _ => continue,
            };
            board.spawn(c(x as i32, y as i32), side);
        }
    }
    board
}

fn humans() -> SideMap<Controller> {
    SideMap::with_value(Controller::Human)
}

fn random_bot(side: Side, seed: u64) -> Controller {
    Controller::Bot(Arc::new(RandomBot::new("random bot", side, GameRng::new(seed))))
}

// =============================================================================
// Turn order
// =============================================================================

#[test]
fn test_blocked_human_move_keeps_turn() {
    let board = board_from(&[
        "b......w", //
        ".b......",
        "..b.....",
        "...w....",
        "....b...",
        ".....b..",
        "......b.",
        "........",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board.clone(), Side::Black);
    engine.drain_events();
    let generation = engine.generation();

    let err = engine.submit_move(Move::new(0, 0, 7, 7)).unwrap_err();
    assert_eq!(
        err,
        SubmitError::Illegal {
            reason: RuleViolation::Blocked { at: c(3, 3) }
        }
    );
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.side_to_move(), Side::Black);
    assert_eq!(engine.generation(), generation);
    assert_eq!(engine.phase(), Phase::AwaitingInput);
}

#[test]
fn test_turn_passes_back_when_opponent_stuck() {
    // Both White pieces are boxed into corners.
    let board = board_from(&[
        "wb......", //
        "bb......",
        "........",
        "........",
        "........",
        "...b....",
        "......bb",
        "......bw",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board, Side::Black);
    engine.drain_events();

    engine.submit_move(Move::new(3, 5, 4, 5)).unwrap();

    assert_eq!(engine.side_to_move(), Side::Black);
    assert!(engine.is_started());
    assert_eq!(engine.state().step_clock, 60);
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::NoMoves { side: Side::White }));
    assert_eq!(
        events.last(),
        Some(&GameEvent::TurnChanged {
            side: Side::Black,
            label: "Black".to_string()
        })
    );
}

#[test]
fn test_stuck_side_to_move_passes_at_start() {
    let board = board_from(&[
        "wb......", //
        "bb......",
        "........",
        "........",
        "........",
        "...b....",
        "......bb",
        "......bw",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board, Side::White);

    assert_eq!(engine.side_to_move(), Side::Black);
    assert!(engine
        .drain_events()
        .contains(&GameEvent::NoMoves { side: Side::White }));
}

#[test]
fn test_neither_side_can_move_is_draw() {
    let board = board_from(&[
        "bbwbbbw.", //
        "bbbwwwbw",
        ".bbbwb.w",
        "bbw.wbwb",
        "w.b.bwbb",
        "bwwb.wb.",
        "bwbbwbwb",
        ".wwwbbwb",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board, Side::Black);

    assert_eq!(engine.outcome(), Some(Outcome::Draw));
    assert!(!engine.is_started());
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn test_connecting_move_wins() {
    let board = board_from(&[
        "b.......", //
        "..b.....",
        "........",
        "........",
        ".......w",
        "........",
        "....w...",
        "......w.",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board, Side::Black);
    engine.drain_events();

    engine.submit_move(Move::new(0, 0, 1, 0)).unwrap();

    assert_eq!(engine.outcome(), Some(Outcome::Win(Side::Black)));
    assert_eq!(engine.record().outcome, Some(Outcome::Win(Side::Black)));
    let events = engine.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count(),
        1
    );

    // Nothing is accepted after the game ends.
    assert_eq!(
        engine.submit_move(Move::new(2, 1, 3, 1)),
        Err(SubmitError::NotStarted)
    );
    engine.tick();
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_bot_error_forfeits() {
    let mut engine = TurnEngine::default();
    engine.start(SideMap::from_pair(random_bot(Side::Black, 1), Controller::Human));
    let request = engine.request_bot_move().unwrap();

    engine.apply_bot_reply(BotReply {
        generation: request.generation,
        side: request.side,
        result: Err(BotError::NoMove { side: Side::Black }),
    });

    assert_eq!(
        engine.outcome(),
        Some(Outcome::ForfeitIllegalMove { loser: Side::Black })
    );
    assert_eq!(engine.outcome().and_then(|o| o.winner()), Some(Side::White));
}

#[test]
fn test_reply_for_wrong_side_ignored() {
    let mut engine = TurnEngine::default();
    engine.start(SideMap::from_pair(random_bot(Side::Black, 1), Controller::Human));
    let request = engine.request_bot_move().unwrap();

    let applied = engine.apply_bot_reply(BotReply {
        generation: request.generation,
        side: Side::White,
        result: Ok(Move::new(0, 1, 2, 1)),
    });

    assert!(!applied);
    assert_eq!(engine.board(), &Board::initial());
    assert_eq!(engine.phase(), Phase::AwaitingBot);
}

#[test]
fn test_stale_reply_after_restart() {
    let mut engine = TurnEngine::default();
    engine.start(SideMap::from_pair(random_bot(Side::Black, 1), Controller::Human));
    let stale = engine.request_bot_move().unwrap();

    engine.start(humans());
    engine.drain_events();
    assert_eq!(engine.generation(), stale.generation + 1);

    let applied = engine.apply_bot_reply(BotReply {
        generation: stale.generation,
        side: Side::Black,
        result: Ok(Move::new(1, 0, 1, 2)),
    });

    assert!(!applied);
    assert_eq!(engine.board(), &Board::initial());
    assert!(engine.record().is_empty());
    assert!(engine.drain_events().is_empty());
}

// =============================================================================
// Records
// =============================================================================

#[test]
fn test_record_replays_to_engine_board() {
    let mut engine = TurnEngine::new(EngineConfig::default().with_seed(9));
    engine.start(humans());

    let mut rng = GameRng::new(9);
    for _ in 0..40 {
        if !engine.is_started() {
            break;
        }
        let side = engine.side_to_move();
        let moves = rust_loa::rules::enumerate_moves(engine.board(), side);
        let mv = *rng.choose(&moves).unwrap();
        engine.submit_move(mv).unwrap();
    }

    let record = engine.record().clone();
    assert!(!record.is_empty());
    let replayed = record.replay().unwrap();
    assert_eq!(replayed.snapshot(), engine.snapshot());

    let decoded = GameRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, record);

    let captures = record.moves.iter().filter(|m| m.captured.is_some()).count();
    assert_eq!(engine.board().total(), 24 - captures);
    assert_eq!(
        engine.board().count(Side::Black) + engine.board().count(Side::White),
        engine.board().total()
    );
}

#[test]
fn test_record_from_custom_position_replays() {
    let board = board_from(&[
        ".......w", //
        "........",
        "........",
        "b.......",
        "........",
        ".....b..",
        "........",
        "...w...w",
    ]);
    let mut engine = TurnEngine::default();
    engine.start_from_position(humans(), board.clone(), Side::Black);
    engine.submit_move(Move::new(0, 3, 1, 3)).unwrap();

    let record = engine.record();
    assert_eq!(record.start, board.snapshot());
    assert_eq!(record.first_to_move, Side::Black);
    assert_eq!(record.replay().unwrap().snapshot(), engine.snapshot());

    let decoded = GameRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.replay().unwrap().snapshot(), engine.snapshot());
}

#[test]
fn test_game_clock_accumulates_per_side() {
    let mut engine = TurnEngine::default();
    engine.start(humans());
    engine.submit_move(Move::new(1, 0, 1, 2)).unwrap();

    let state = engine.state();
    assert!(state.game_clock[Side::Black] >= 0.0);
    assert_eq!(state.game_clock[Side::White], 0.0);
    assert!(engine.game_clock(Side::White) >= 0.0);
}
