use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted grid dimension, in cells
pub const MAX_GRID_SIZE: usize = 1000;

/// Reasons a [`GameConfig`] can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One of the grid dimensions is zero
    #[error("invalid grid size {width}x{height}: both dimensions must be at least 1")]
    InvalidGrid { width: usize, height: usize },

    /// One of the grid dimensions is beyond what can be drawn
    #[error("grid size {width}x{height} is too large: at most {max} cells per side")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// The starting snake does not fit on the grid
    #[error("initial snake length {length} does not fit a grid {width} cells wide")]
    InvalidSnakeLength { length: usize, width: usize },

    /// A tick interval of zero would spin the scheduler
    #[error("tick interval must be greater than zero")]
    InvalidTickInterval,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded for eating food
    pub food_reward: u32,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 150,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that a game can actually be laid out with this configuration.
    ///
    /// The snake starts centred and extends backwards from the head, so it
    /// must fit in the left half of the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_grid(self.grid_width, self.grid_height)?;

        if self.initial_snake_length == 0 || self.initial_snake_length > self.grid_width / 2 + 1 {
            return Err(ConfigError::InvalidSnakeLength {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }

        Ok(())
    }

    /// Check a grid size on its own
    pub fn validate_grid(width: usize, height: usize) -> Result<(), ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidGrid { width, height });
        }

        if width > MAX_GRID_SIZE || height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIZE,
            });
        }

        Ok(())
    }

    /// Same configuration on a different grid
    pub fn with_grid(&self, width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..self.clone()
        }
    }

    /// Length of the snake laid out on this grid: the configured length,
    /// shortened when the grid is too narrow for it
    pub fn layout_snake_length(&self) -> usize {
        self.initial_snake_length.clamp(1, self.grid_width / 2 + 1)
    }
}
