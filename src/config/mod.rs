pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{Difficulty, Rules};
pub use loader::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    // Overrides for the difficulty preset
    pub color_count: Option<u8>,
    pub base_fall_interval: Option<f64>,
    // Fixed seed for reproducible games; random when unset
    pub seed: Option<u64>,
    pub animate_cascade: bool,
    pub cascade_step_ms: u64,
    pub frame_ms: u64,
    pub show_ghost: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            color_count: None,
            base_fall_interval: None,
            seed: None,
            animate_cascade: true,
            cascade_step_ms: 60,
            frame_ms: 16,
            show_ghost: true,
        }
    }
}

impl Config {
    /// Session rules for `difficulty`, with any overrides from this config.
    pub fn rules_for(&self, difficulty: Difficulty) -> Result<Rules, ConfigError> {
        let color_count = self.color_count.unwrap_or(difficulty.color_count());
        let interval = self
            .base_fall_interval
            .unwrap_or(difficulty.base_fall_interval());
        Rules::new(color_count, interval).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn rules(&self) -> Result<Rules, ConfigError> {
        self.rules_for(self.difficulty)
    }

    #[must_use]
    pub fn cascade_step(&self) -> Duration {
        Duration::from_millis(self.cascade_step_ms.max(1))
    }

    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    #[must_use]
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(|| fastrand::u64(..))
    }
}
