//! The turn state machine.
//!
//! `TurnEngine` owns the board and the turn state and is the only code that
//! mutates either. It is synchronous: timers and bot calls live in the
//! [`driver`](super::driver), which feeds the engine ticks, commands and
//! bot replies and forwards the events it produces.
//!
//! ## Phases
//!
//! ```text
//! Idle --start--> AwaitingInput | AwaitingBot --win/draw/forfeit--> GameOver
//!                        ^                |
//!                        +----next turn---+
//! ```
//!
//! ## Generations
//!
//! The generation counter is bumped by `start` and by every applied move.
//! A bot request captures it, and a reply carrying any other generation is
//! dropped, so replies for an abandoned position never touch the board.

use std::sync::Arc;

use derive_more::{Display, Error};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::event::{GameEvent, Outcome};
use super::record::GameRecord;
use crate::bots::{Bot, BotError};
use crate::core::{Board, BoardSnapshot, Coord, EngineConfig, Move, Side, SideMap};
use crate::rules::{check_move, destinations, evaluate, has_any_move, RuleViolation, WinState};

/// Who decides the moves of one side.
#[derive(Clone)]
pub enum Controller {
    /// Moves arrive through `submit_move` / `select_cell`.
    Human,
    /// Moves are requested from a bot.
    Bot(Arc<dyn Bot>),
}

impl Controller {
    #[must_use]
    pub fn is_bot(&self) -> bool {
        matches!(self, Controller::Bot(_))
    }

    #[must_use]
    pub fn bot(&self) -> Option<&Arc<dyn Bot>> {
        match self {
            Controller::Bot(bot) => Some(bot),
            Controller::Human => None,
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Human => write!(f, "Human"),
            Controller::Bot(bot) => write!(f, "Bot({})", bot.name()),
        }
    }
}

/// Where the engine is in the game lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started.
    Idle,
    /// Waiting for a human move.
    AwaitingInput,
    /// Waiting for a bot reply.
    AwaitingBot,
    /// Finished; nothing is accepted until the next `start`.
    GameOver(Outcome),
}

/// Observable turn state.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnState {
    pub side_to_move: Side,
    pub started: bool,
    /// Seconds left for the current move.
    pub step_clock: u32,
    /// Cumulative seconds spent by each side on completed turns.
    pub game_clock: SideMap<f64>,
    pub generation: u64,
    pub phase: Phase,
}

impl TurnState {
    fn idle(step_seconds: u32) -> Self {
        Self {
            side_to_move: Side::Black,
            started: false,
            step_clock: step_seconds,
            game_clock: SideMap::with_value(0.0),
            generation: 0,
            phase: Phase::Idle,
        }
    }
}

/// A pending request to the bot of the side to move.
#[derive(Clone)]
pub struct BotRequest {
    pub generation: u64,
    pub side: Side,
    pub snapshot: BoardSnapshot,
    pub bot: Arc<dyn Bot>,
}

impl std::fmt::Debug for BotRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRequest")
            .field("generation", &self.generation)
            .field("side", &self.side)
            .field("bot", &self.bot.name())
            .finish()
    }
}

/// A bot's answer to a [`BotRequest`].
#[derive(Clone, Debug, PartialEq)]
pub struct BotReply {
    pub generation: u64,
    pub side: Side,
    pub result: Result<Move, BotError>,
}

/// Why `submit_move` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SubmitError {
    #[display("no game in progress")]
    NotStarted,
    #[display("{} is controlled by a bot", side)]
    NotHumanTurn { side: Side },
    #[display("illegal move: {}", reason)]
    Illegal { reason: RuleViolation },
}

/// The rule engine and turn state machine.
#[derive(Debug)]
pub struct TurnEngine {
    config: EngineConfig,
    board: Board,
    state: TurnState,
    controllers: SideMap<Controller>,
    selected: Option<Coord>,
    turn_started: Instant,
    record: GameRecord,
    events: Vec<GameEvent>,
}

impl TurnEngine {
    /// An idle engine showing the starting position.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: TurnState::idle(config.step_seconds),
            config,
            board: Board::initial(),
            controllers: SideMap::new(|_| Controller::Human),
            selected: None,
            turn_started: Instant::now(),
            record: GameRecord::new(),
            events: Vec::new(),
        }
    }

    /// Reset everything and begin a new game with Black to move.
    pub fn start(&mut self, controllers: SideMap<Controller>) {
        self.start_from_position(controllers, Board::initial(), Side::Black);
    }

    /// Begin a new game from an arbitrary position.
    ///
    /// Used for puzzles and analysis. A position that is already decided
    /// ends the game immediately, and a side to move without legal moves
    /// passes to the other side.
    #[instrument(skip_all, fields(side = %side_to_move))]
    pub fn start_from_position(
        &mut self,
        controllers: SideMap<Controller>,
        board: Board,
        side_to_move: Side,
    ) {
        let generation = self.state.generation + 1;
        self.board = board;
        self.state = TurnState {
            started: true,
            generation,
            side_to_move,
            ..TurnState::idle(self.config.step_seconds)
        };
        self.controllers = controllers;
        self.selected = None;
        self.turn_started = Instant::now();
        self.record = GameRecord::from_position(&self.board, side_to_move);
        self.state.phase = self.phase_for(side_to_move);

        info!(
            black = ?self.controllers[Side::Black],
            white = ?self.controllers[Side::White],
            "Game started"
        );
        self.events.push(GameEvent::Started { generation });
        self.events.push(GameEvent::BoardChanged {
            last_move: None,
            captured: None,
        });
        self.settle_turn(side_to_move.opponent());
    }

    /// Submit a human move for the side to move.
    ///
    /// Illegal moves are reported with `IllegalMoveRejected` and leave the
    /// turn unchanged. Input is ignored when no game is running or a bot
    /// controls the side to move.
    pub fn submit_move(&mut self, mv: Move) -> Result<(), SubmitError> {
        if !self.state.started {
            return Err(SubmitError::NotStarted);
        }
        let side = self.state.side_to_move;
        if self.controllers[side].is_bot() {
            return Err(SubmitError::NotHumanTurn { side });
        }

        match check_move(&self.board, side, mv) {
            Ok(()) => {
                self.apply(side, mv);
                Ok(())
            }
            Err(reason) => {
                debug!(%side, %mv, %reason, "Rejected human move");
                self.selected = None;
                self.events.push(GameEvent::IllegalMoveRejected { mv, reason });
                Err(SubmitError::Illegal { reason })
            }
        }
    }

    /// The request to send when a bot is to move.
    #[must_use]
    pub fn request_bot_move(&self) -> Option<BotRequest> {
        if !self.state.started || self.state.phase != Phase::AwaitingBot {
            return None;
        }
        let side = self.state.side_to_move;
        let bot = self.controllers[side].bot()?.clone();
        Some(BotRequest {
            generation: self.state.generation,
            side,
            snapshot: self.board.snapshot(),
            bot,
        })
    }

    /// Feed a bot reply. Returns `false` if it was stale and ignored.
    ///
    /// Anything other than a legal move forfeits: an illegal move, no move
    /// or a bot error lose with `ForfeitIllegalMove`, a timeout loses with
    /// `ForfeitTimeout`.
    #[instrument(skip_all, fields(side = %reply.side, generation = reply.generation))]
    pub fn apply_bot_reply(&mut self, reply: BotReply) -> bool {
        let side = self.state.side_to_move;
        if !self.state.started
            || reply.generation != self.state.generation
            || reply.side != side
            || self.state.phase != Phase::AwaitingBot
        {
            debug!(current = self.state.generation, "Discarding stale bot reply");
            return false;
        }

        match reply.result {
            Ok(mv) => match check_move(&self.board, side, mv) {
                Ok(()) => self.apply(side, mv),
                Err(reason) => {
                    warn!(%mv, %reason, "Bot submitted an illegal move");
                    self.finish(Outcome::ForfeitIllegalMove { loser: side });
                }
            },
            Err(BotError::Timeout { millis }) => {
                warn!(millis, "Bot timed out");
                self.finish(Outcome::ForfeitTimeout { loser: side });
            }
            Err(error) => {
                warn!(%error, "Bot failed to move");
                self.finish(Outcome::ForfeitIllegalMove { loser: side });
            }
        }
        true
    }

    /// One second of the step clock. At zero the side to move loses.
    pub fn tick(&mut self) {
        if !self.state.started {
            return;
        }
        let side = self.state.side_to_move;
        self.state.step_clock = self.state.step_clock.saturating_sub(1);

        self.events.push(GameEvent::StepClockTick {
            remaining: self.state.step_clock,
        });
        self.events.push(GameEvent::GameClockTick {
            side,
            elapsed: self.game_clock(side),
        });

        if self.state.step_clock == 0 {
            info!(%side, "Step clock expired");
            self.finish(Outcome::ForfeitTimeout { loser: side });
        }
    }

    /// Two-click human input: select an own piece, then a destination.
    pub fn select_cell(&mut self, at: Coord) {
        if !self.state.started || self.state.phase != Phase::AwaitingInput {
            return;
        }

        if let Some(from) = self.selected.take() {
            let side = self.state.side_to_move;
            if destinations(&self.board, side, from).contains(&at) {
                // Legal by construction.
                let _ = self.submit_move(Move::between(from, at));
                return;
            }
        }

        let candidates = self.candidates(at);
        if candidates.is_empty() {
            self.events.push(GameEvent::Selected {
                at: None,
                candidates,
            });
        } else {
            self.selected = Some(at);
            self.events.push(GameEvent::Selected {
                at: Some(at),
                candidates,
            });
        }
    }

    /// Destinations of the piece at `at`, for highlighting.
    ///
    /// Empty unless a human is to move and `at` holds one of its pieces.
    #[must_use]
    pub fn candidates(&self, at: Coord) -> Vec<Coord> {
        if !self.state.started || self.state.phase != Phase::AwaitingInput {
            return Vec::new();
        }
        destinations(&self.board, self.state.side_to_move, at).into_vec()
    }

    /// Cumulative thinking time of `side`, including the running turn.
    #[must_use]
    pub fn game_clock(&self, side: Side) -> f64 {
        let mut total = self.state.game_clock[side];
        if self.state.started && side == self.state.side_to_move {
            total += self.turn_started.elapsed().as_secs_f64();
        }
        total
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.started
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    #[must_use]
    pub fn controllers(&self) -> &SideMap<Controller> {
        &self.controllers
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The move history of the current (or last) game.
    #[must_use]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    fn phase_for(&self, side: Side) -> Phase {
        if self.controllers[side].is_bot() {
            Phase::AwaitingBot
        } else {
            Phase::AwaitingInput
        }
    }

    fn push_turn_changed(&mut self) {
        let side = self.state.side_to_move;
        self.events.push(GameEvent::TurnChanged {
            side,
            label: side.to_string(),
        });
    }

    /// Apply a validated move and settle the turn.
    fn apply(&mut self, side: Side, mv: Move) {
        let captured = self.board.apply(mv).map(|piece| piece.id());
        self.record.push(side, mv, captured);
        self.state.game_clock[side] += self.turn_started.elapsed().as_secs_f64();
        self.state.generation += 1;
        self.selected = None;

        debug!(
            %side,
            %mv,
            captured = ?captured,
            generation = self.state.generation,
            "Applied move"
        );
        self.events.push(GameEvent::BoardChanged {
            last_move: Some(mv),
            captured,
        });

        self.settle_turn(side);
    }

    /// Check for the end of the game after `last` moved, then hand the turn
    /// to its opponent, or back to `last` if the opponent is stuck.
    fn settle_turn(&mut self, last: Side) {
        match evaluate(&self.board) {
            WinState::Single(winner) => self.finish(Outcome::Win(winner)),
            WinState::Both => self.finish(Outcome::BothWin),
            WinState::None => {
                let next = last.opponent();
                let next_can_move = has_any_move(&self.board, next);
                if !next_can_move && !has_any_move(&self.board, last) {
                    self.finish(Outcome::Draw);
                    return;
                }

                self.state.step_clock = self.config.step_seconds;
                self.turn_started = Instant::now();
                if next_can_move {
                    self.state.side_to_move = next;
                } else {
                    info!(side = %next, "No legal moves, turn passes back");
                    self.events.push(GameEvent::NoMoves { side: next });
                    self.state.side_to_move = last;
                }
                self.state.phase = self.phase_for(self.state.side_to_move);
                self.push_turn_changed();
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if matches!(self.state.phase, Phase::GameOver(_)) {
            return;
        }
        info!(%outcome, plies = self.record.len(), "Game over");
        self.state.started = false;
        self.state.phase = Phase::GameOver(outcome);
        self.selected = None;
        self.record.outcome = Some(outcome);
        self.events.push(GameEvent::GameOver(outcome));
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
