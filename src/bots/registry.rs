//! Named bot factories.
//!
//! The registry is an ordinary value owned by whoever sets up games; there
//! is no global list. Names are unique: registering a taken name logs a
//! warning and keeps the first factory.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::{Bot, MctsBot, RandomBot};
use crate::core::{GameRng, Side};
use crate::mcts::MCTSConfig;

/// Everything a factory needs to build a bot for one game.
#[derive(Clone, Debug)]
pub struct BotContext {
    /// Side the bot will play.
    pub side: Side,
    /// Private random stream for this bot.
    pub rng: GameRng,
    /// Search settings for evaluator bots.
    pub mcts: MCTSConfig,
}

impl BotContext {
    pub fn new(side: Side, rng: GameRng) -> Self {
        Self {
            side,
            rng,
            mcts: MCTSConfig::default(),
        }
    }

    #[must_use]
    pub fn with_mcts(mut self, mcts: MCTSConfig) -> Self {
        self.mcts = mcts;
        self
    }
}

/// Builds a bot for a context.
pub type BotFactory = Arc<dyn Fn(BotContext) -> Arc<dyn Bot> + Send + Sync>;

/// Ordered, name-indexed collection of bot factories.
#[derive(Clone, Default)]
pub struct BotRegistry {
    entries: Vec<(String, BotFactory)>,
    index: FxHashMap<String, usize>,
}

impl BotRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `"random bot"` and `"plain bot"`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("random bot", |ctx: BotContext| {
            Arc::new(RandomBot::new("random bot", ctx.side, ctx.rng)) as Arc<dyn Bot>
        });
        registry.register("plain bot", |ctx: BotContext| {
            Arc::new(MctsBot::new("plain bot", ctx.side, ctx.mcts, ctx.rng)) as Arc<dyn Bot>
        });
        registry
    }

    /// Add a factory under `name`. Returns `false` (and keeps the existing
    /// entry) if the name is taken.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn(BotContext) -> Arc<dyn Bot> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.index.contains_key(&name) {
            warn!(%name, "Bot name already registered, ignoring");
            return false;
        }
        debug!(%name, "Registered bot");
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, Arc::new(factory)));
        true
    }

    /// The factory registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BotFactory> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Build the bot registered under `name`.
    pub fn create(&self, name: &str, ctx: BotContext) -> Option<Arc<dyn Bot>> {
        self.get(name).map(|factory| factory(ctx))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for BotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotRegistry")
            .field("names", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_order() {
        let registry = BotRegistry::with_defaults();
        assert_eq!(registry.list(), vec!["random bot", "plain bot"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("plain bot"));
        assert!(!registry.contains("deep bot"));
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut registry = BotRegistry::with_defaults();
        let added = registry.register("random bot", |ctx: BotContext| {
            Arc::new(MctsBot::new("impostor", ctx.side, ctx.mcts, ctx.rng)) as Arc<dyn Bot>
        });
        assert!(!added);
        assert_eq!(registry.len(), 2);

        let bot = registry
            .create("random bot", BotContext::new(Side::Black, GameRng::new(1)))
            .unwrap();
        assert_eq!(bot.name(), "random bot");
    }

    #[test]
    fn test_create_binds_side() {
        let registry = BotRegistry::with_defaults();
        let bot = registry
            .create("plain bot", BotContext::new(Side::White, GameRng::new(2)))
            .unwrap();
        assert_eq!(bot.side(), Side::White);
        assert!(registry
            .create("missing", BotContext::new(Side::White, GameRng::new(2)))
            .is_none());
    }

    #[test]
    fn test_custom_registration_order() {
        let mut registry = BotRegistry::new();
        assert!(registry.is_empty());
        for name in ["c", "a", "b"] {
            registry.register(name, |ctx: BotContext| {
                Arc::new(RandomBot::new("r", ctx.side, ctx.rng)) as Arc<dyn Bot>
            });
        }
        assert_eq!(registry.list(), vec!["c", "a", "b"]);
    }
}
