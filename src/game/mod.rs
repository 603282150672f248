//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or rendering dependencies.
//! The state is a plain value handed to the engine, so a game can be replayed
//! tick by tick in tests without a terminal or a timer.

pub mod action;
pub mod config;
pub mod engine;
pub mod phase;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, request_direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, ResizeOutcome, StepResult};
pub use phase::GamePhase;
pub use state::{CollisionType, GameState, Position, Snake};
