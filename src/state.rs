//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::fault::{Dice, EntropyDice};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration and the dice that picks each request's outcome.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dice: Arc<dyn Dice>,
}

impl AppState {
    /// Creates state that rolls from OS entropy.
    pub fn new(config: AppConfig) -> Self {
        Self::with_dice(config, EntropyDice)
    }

    /// Creates state with a caller-supplied dice.
    pub fn with_dice(config: AppConfig, dice: impl Dice) -> Self {
        Self {
            config: Arc::new(config),
            dice: Arc::new(dice),
        }
    }

    /// Delay for the slow outcome.
    pub fn latency(&self) -> Duration {
        Duration::from_secs(self.config.fault.latency_seconds)
    }
}
