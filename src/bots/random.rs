//! Uniform random bot.

use std::sync::Mutex;

use tracing::debug;

use super::{Bot, BotError};
use crate::core::{BoardSnapshot, GameRng, Move, Side};
use crate::rules::enumerate_moves;

/// Picks uniformly among the legal moves of its side.
pub struct RandomBot {
    name: String,
    side: Side,
    rng: Mutex<GameRng>,
}

impl RandomBot {
    /// Creates a random bot for `side`.
    pub fn new(name: impl Into<String>, side: Side, rng: GameRng) -> Self {
        Self {
            name: name.into(),
            side,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait::async_trait]
impl Bot for RandomBot {
    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn make_move(&self, snapshot: BoardSnapshot) -> Result<Move, BotError> {
        let moves = enumerate_moves(&snapshot, self.side);
        let mut rng = self.rng.lock().map_err(|e| BotError::Failed {
            message: e.to_string(),
        })?;
        let mv = rng
            .choose(&moves)
            .copied()
            .ok_or(BotError::NoMove { side: self.side })?;
        debug!(bot = %self.name, side = %self.side, %mv, "Random bot chose move");
        Ok(mv)
    }
}
