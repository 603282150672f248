//! Persistence of the best score across sessions

pub mod high_score;

pub use high_score::{FileHighScoreStore, HighScoreRecord, HighScoreStore, MemoryHighScoreStore};
