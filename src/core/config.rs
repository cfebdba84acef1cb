//! Engine configuration.
//!
//! `EngineConfig` carries the timing constants of a game (step clock,
//! presentation delay between moves, bot timeout), the master seed that
//! bot streams are derived from, and the tree-search settings used by the
//! evaluator bot. It can be built in code with the `with_*` methods or
//! loaded from TOML:
//!
//! ```toml
//! step_seconds = 30
//! move_delay_ms = 0
//! seed = 7
//!
//! [mcts]
//! iterations = 500
//! ```

use std::path::Path;
use std::time::Duration;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::mcts::MCTSConfig;

/// Configuration loading or validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[display("failed to read config {}: {}", path, message)]
    Io {
        /// File that failed.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// The TOML did not parse into an `EngineConfig`.
    #[display("invalid config syntax: {}", message)]
    Parse {
        /// Parser error text.
        message: String,
    },
    /// A value is out of range.
    #[display("invalid config value: {}", message)]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

/// Timing and search parameters for one engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds a side has for each move before it loses on time.
    pub step_seconds: u32,

    /// Delay before a bot is asked for its move, in milliseconds.
    /// Gives collaborators time to animate the previous move.
    pub move_delay_ms: u64,

    /// Hard limit on a single bot reply. `None` means the step clock length.
    pub bot_timeout_ms: Option<u64>,

    /// Master seed; each bot gets a stream derived from it per game.
    pub seed: u64,

    /// Settings for the tree-search bot.
    pub mcts: MCTSConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_seconds: 60,
            move_delay_ms: 350,
            bot_timeout_ms: None,
            seed: 42,
            mcts: MCTSConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        debug!(?config, "Loaded engine config");
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "step_seconds must be at least 1".to_string(),
            });
        }
        if self.bot_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                message: "bot_timeout_ms must be positive".to_string(),
            });
        }
        if self.mcts.iterations == 0 {
            return Err(ConfigError::Invalid {
                message: "mcts.iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the per-move clock.
    #[must_use]
    pub fn with_step_seconds(mut self, seconds: u32) -> Self {
        self.step_seconds = seconds;
        self
    }

    /// Set the delay before bot requests.
    #[must_use]
    pub fn with_move_delay_ms(mut self, ms: u64) -> Self {
        self.move_delay_ms = ms;
        self
    }

    /// Set the hard bot timeout.
    #[must_use]
    pub fn with_bot_timeout_ms(mut self, ms: u64) -> Self {
        self.bot_timeout_ms = Some(ms);
        self
    }

    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tree-search settings.
    #[must_use]
    pub fn with_mcts(mut self, mcts: MCTSConfig) -> Self {
        self.mcts = mcts;
        self
    }

    /// Delay before a bot request.
    #[must_use]
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Effective hard timeout for one bot reply.
    #[must_use]
    pub fn bot_timeout(&self) -> Duration {
        self.bot_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_secs(u64::from(self.step_seconds)))
    }
}
