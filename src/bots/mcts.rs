//! Tree-search bot.
//!
//! The search is CPU bound, so it runs on tokio's blocking pool and the
//! async side only awaits the join handle. Dropping the `make_move` future
//! (a driver timeout or abort) sets the search's cancel flag, so the
//! blocking thread stops at its next iteration instead of running on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use super::{Bot, BotError};
use crate::core::{BoardSnapshot, GameRng, Move, Side};
use crate::mcts::{Bitboard, MCTSConfig, MCTSSearch};

/// The "plain bot": MCTS over a bitboard copy of the snapshot.
pub struct MctsBot {
    name: String,
    side: Side,
    config: MCTSConfig,
    rng: Mutex<GameRng>,
}

impl MctsBot {
    pub fn new(name: impl Into<String>, side: Side, config: MCTSConfig, rng: GameRng) -> Self {
        Self {
            name: name.into(),
            side,
            config,
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Sets the flag when dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl Bot for MctsBot {
    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(bot = %self.name, side = %self.side))]
    async fn make_move(&self, snapshot: BoardSnapshot) -> Result<Move, BotError> {
        let rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Failed {
                message: e.to_string(),
            })?
            .fork();
        let config = self.config.clone();
        let side = self.side;
        let cancel = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(cancel.clone());

        let (best, iterations) = tokio::task::spawn_blocking(move || {
            let root = Bitboard::new(&snapshot, side);
            let mut search = MCTSSearch::with_rng(config, rng).with_cancel(cancel);
            let best = search.search(&root);
            (best, search.stats().iterations)
        })
        .await
        .map_err(|e| BotError::Join {
            message: e.to_string(),
        })?;

        let mv = best.ok_or(BotError::NoMove { side })?;
        debug!(%mv, iterations, "Search bot chose move");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Coord};
    use crate::rules::is_legal;

    fn config() -> MCTSConfig {
        MCTSConfig::default().with_iterations(100).with_rollout_limit(32)
    }

    #[tokio::test]
    async fn test_mcts_bot_plays_legal_move() {
        let board = Board::initial();
        let bot = MctsBot::new("plain bot", Side::Black, config(), GameRng::new(1));

        let mv = bot.make_move(board.snapshot()).await.unwrap();
        assert!(is_legal(&board, Side::Black, mv));
        assert_eq!(bot.config().iterations, 100);
    }

    #[test]
    fn test_cancel_guard_sets_flag_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = CancelOnDrop(flag.clone());
        assert!(!flag.load(Ordering::Relaxed));

        drop(guard);
        assert!(flag.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_timed_out_search_is_cancelled() {
        let bot = MctsBot::new(
            "plain bot",
            Side::Black,
            MCTSConfig::default().with_iterations(u32::MAX),
            GameRng::new(1),
        );
        let pending = bot.make_move(Board::initial().snapshot());
        let result = tokio::time::timeout(std::time::Duration::from_millis(20), pending).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mcts_bot_on_finished_position() {
        let mut board = Board::empty();
        board.spawn(Coord::try_new(0, 0).unwrap(), Side::Black);
        board.spawn(Coord::try_new(0, 1).unwrap(), Side::Black);
        board.spawn(Coord::try_new(5, 5).unwrap(), Side::White);
        board.spawn(Coord::try_new(7, 7).unwrap(), Side::White);

        let bot = MctsBot::new("plain bot", Side::White, config(), GameRng::new(1));
        assert_eq!(
            bot.make_move(board.snapshot()).await,
            Err(BotError::NoMove { side: Side::White })
        );
    }
}
