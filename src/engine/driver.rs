//! Async driver: owns a [`TurnEngine`] and supplies its time and its bots.
//!
//! The driver is one tokio task. It waits on three sources at once:
//!
//! - commands from any number of [`DriverHandle`]s
//! - replies from the bot task currently thinking, if any
//! - a one-second ticker while a game is running
//!
//! After each wake-up it re-synchronizes with the engine: a new generation
//! restarts the ticker and aborts the bot task, and if a bot is to move a
//! fresh bot task is spawned. Engine events are forwarded to the event
//! channel in the order they were produced.

use derive_more::{Display, Error};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use super::event::GameEvent;
use super::record::GameRecord;
use super::turn::{BotReply, BotRequest, Controller, SubmitError, TurnEngine, TurnState};
use crate::bots::BotError;
use crate::core::{BoardSnapshot, Coord, EngineConfig, Move, SideMap};

const TICK: Duration = Duration::from_secs(1);

/// Why a handle request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DriverError {
    /// The driver task has stopped.
    #[display("game driver is not running")]
    Closed,
    /// The engine refused the move.
    #[display("move refused: {}", reason)]
    Rejected { reason: SubmitError },
}

/// Everything a status query reports.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverStatus {
    pub snapshot: BoardSnapshot,
    pub state: TurnState,
    pub record: GameRecord,
}

/// Requests accepted by the driver.
#[derive(Debug)]
pub enum Command {
    Start {
        controllers: SideMap<Controller>,
    },
    SelectCell(Coord),
    SubmitMove {
        mv: Move,
        reply: oneshot::Sender<Result<(), SubmitError>>,
    },
    Candidates {
        at: Coord,
        reply: oneshot::Sender<Vec<Coord>>,
    },
    Status {
        reply: oneshot::Sender<DriverStatus>,
    },
    Shutdown,
}

/// Cloneable front end of a running [`GameDriver`].
#[derive(Clone, Debug)]
pub struct DriverHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl DriverHandle {
    /// Start a new game, abandoning any game in progress.
    pub fn start(&self, controllers: SideMap<Controller>) -> Result<(), DriverError> {
        self.send(Command::Start { controllers })
    }

    /// Forward a board click.
    pub fn select_cell(&self, at: Coord) -> Result<(), DriverError> {
        self.send(Command::SelectCell(at))
    }

    /// Submit a human move and wait for the verdict.
    pub async fn submit_move(&self, mv: Move) -> Result<(), DriverError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::SubmitMove { mv, reply })?;
        rx.await
            .map_err(|_| DriverError::Closed)?
            .map_err(|reason| DriverError::Rejected { reason })
    }

    /// Reachable cells from `at` for the human to move.
    pub async fn candidates(&self, at: Coord) -> Result<Vec<Coord>, DriverError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Candidates { at, reply })?;
        rx.await.map_err(|_| DriverError::Closed)
    }

    /// Current board, turn state and record.
    pub async fn status(&self) -> Result<DriverStatus, DriverError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Status { reply })?;
        rx.await.map_err(|_| DriverError::Closed)
    }

    /// Stop the driver task.
    pub fn shutdown(&self) -> Result<(), DriverError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<(), DriverError> {
        self.commands.send(command).map_err(|_| DriverError::Closed)
    }
}

enum Wake {
    Command(Option<Command>),
    Reply(BotReply),
    Tick,
}

/// The task that runs games.
pub struct GameDriver {
    engine: TurnEngine,
    commands: mpsc::UnboundedReceiver<Command>,
    replies_tx: mpsc::UnboundedSender<BotReply>,
    replies_rx: mpsc::UnboundedReceiver<BotReply>,
    events: mpsc::UnboundedSender<GameEvent>,
    ticker: Option<Interval>,
    synced_generation: u64,
    thinking: Option<JoinHandle<()>>,
}

impl GameDriver {
    /// Create a driver and the handle that controls it.
    ///
    /// Nothing happens until [`GameDriver::run`] is awaited (usually inside
    /// `tokio::spawn`).
    pub fn new(
        config: EngineConfig,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, DriverHandle) {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let driver = Self {
            engine: TurnEngine::new(config),
            commands,
            replies_tx,
            replies_rx,
            events,
            ticker: None,
            synced_generation: 0,
            thinking: None,
        };
        (
            driver,
            DriverHandle {
                commands: commands_tx,
            },
        )
    }

    /// Run until `Shutdown` or until every handle is dropped.
    pub async fn run(mut self) {
        info!("Game driver running");

        loop {
            let wake = tokio::select! {
                command = self.commands.recv() => Wake::Command(command),
                Some(reply) = self.replies_rx.recv() => Wake::Reply(reply),
                _ = next_tick(&mut self.ticker) => Wake::Tick,
            };

            match wake {
                Wake::Command(None) | Wake::Command(Some(Command::Shutdown)) => break,
                Wake::Command(Some(command)) => self.handle(command),
                Wake::Reply(reply) => {
                    if self.engine.apply_bot_reply(reply) {
                        self.thinking = None;
                    }
                }
                Wake::Tick => self.engine.tick(),
            }
            self.sync();
        }

        self.abort_bot();
        info!("Game driver stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Start { controllers } => self.engine.start(controllers),
            Command::SelectCell(at) => self.engine.select_cell(at),
            Command::SubmitMove { mv, reply } => {
                let result = self.engine.submit_move(mv);
                let _ = reply.send(result);
            }
            Command::Candidates { at, reply } => {
                let _ = reply.send(self.engine.candidates(at));
            }
            Command::Status { reply } => {
                let _ = reply.send(DriverStatus {
                    snapshot: self.engine.snapshot(),
                    state: self.engine.state().clone(),
                    record: self.engine.record().clone(),
                });
            }
            Command::Shutdown => {}
        }
    }

    /// Bring timers and bot tasks in line with the engine, then flush events.
    fn sync(&mut self) {
        if !self.engine.is_started() {
            self.ticker = None;
            self.abort_bot();
        } else if self.engine.generation() != self.synced_generation {
            self.synced_generation = self.engine.generation();
            self.abort_bot();

            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.ticker = Some(ticker);

            if let Some(request) = self.engine.request_bot_move() {
                self.spawn_bot(request);
            }
        }

        for event in self.engine.drain_events() {
            if self.events.send(event).is_err() {
                trace!("Event receiver dropped");
            }
        }
    }

    fn spawn_bot(&mut self, request: BotRequest) {
        let delay = self.engine.config().move_delay();
        let limit = self.engine.config().bot_timeout();
        let replies = self.replies_tx.clone();
        debug!(
            side = %request.side,
            bot = request.bot.name(),
            generation = request.generation,
            "Requesting bot move"
        );

        self.thinking = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = match tokio::time::timeout(limit, request.bot.make_move(request.snapshot))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(BotError::Timeout {
                    millis: limit.as_millis() as u64,
                }),
            };
            let _ = replies.send(BotReply {
                generation: request.generation,
                side: request.side,
                result,
            });
        }));
    }

    fn abort_bot(&mut self) {
        if let Some(task) = self.thinking.take() {
            task.abort();
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
