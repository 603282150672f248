//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic with an explicit, replayable state (game module)
//! - A session tying the engine to high score persistence (session module)
//! - TUI rendering and keyboard mapping (render, input modules)
//! - The interactive scheduler (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;
