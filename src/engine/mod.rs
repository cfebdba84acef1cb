//! The game engine: turn state machine, events, records and the async
//! driver that runs it.
//!
//! [`TurnEngine`] is synchronous and deterministic given its inputs, which
//! makes it easy to test directly. [`GameDriver`] wraps it in a tokio task
//! that supplies clock ticks and bot replies.

pub mod driver;
pub mod event;
pub mod record;
pub mod turn;

pub use driver::{Command, DriverError, DriverHandle, DriverStatus, GameDriver};
pub use event::{format_clock, GameEvent, Outcome};
pub use record::{GameRecord, MoveRecord, RecordError, ReplayError};
pub use turn::{BotReply, BotRequest, Controller, Phase, SubmitError, TurnEngine, TurnState};
