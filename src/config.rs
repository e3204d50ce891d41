//! Benchmark configuration.

use crate::games::tictactoe::{DEFAULT_MAX_ATTEMPTS, InvalidMovePolicy};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings shared by live play and puzzle generation.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Whether the opponent (human or agent) moves first.
    #[serde(default = "default_player_first")]
    player_first: bool,

    /// Generation attempts before falling back to a rule state.
    #[serde(default = "default_max_attempts")]
    max_attempts: usize,

    /// What an `INVALID_MOVE` status does to the next move.
    #[serde(default)]
    invalid_move_policy: InvalidMovePolicy,

    /// Seed for every random draw; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Fixtures produced by one `generate` run.
    #[serde(default = "default_sample_size")]
    sample_size: usize,

    /// Consecutive invalid moves tolerated in interactive play.
    #[serde(default = "default_maximum_trials")]
    maximum_trials: u32,
}

#[instrument]
fn default_player_first() -> bool {
    true
}

#[instrument]
fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

#[instrument]
fn default_sample_size() -> usize {
    100
}

#[instrument]
fn default_maximum_trials() -> u32 {
    3
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            player_first: default_player_first(),
            max_attempts: default_max_attempts(),
            invalid_move_policy: InvalidMovePolicy::default(),
            seed: None,
            sample_size: default_sample_size(),
            maximum_trials: default_maximum_trials(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            max_attempts = config.max_attempts,
            policy = ?config.invalid_move_policy,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Overrides the invalid-move policy.
    pub fn with_policy(mut self, policy: Option<InvalidMovePolicy>) -> Self {
        if let Some(policy) = policy {
            self.invalid_move_policy = policy;
        }
        self
    }

    /// Overrides the sample size.
    pub fn with_sample_size(mut self, sample_size: Option<usize>) -> Self {
        if let Some(sample_size) = sample_size {
            self.sample_size = sample_size;
        }
        self
    }

    /// Overrides who moves first.
    pub fn with_player_first(mut self, player_first: Option<bool>) -> Self {
        if let Some(player_first) = player_first {
            self.player_first = player_first;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
