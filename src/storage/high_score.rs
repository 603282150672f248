//! High score persistence
//!
//! The only thing the game ever persists is one integer, the best score. The
//! engine never touches storage: the session reads the value once at startup
//! and hands every new record to a [`HighScoreStore`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Somewhere the best score lives between runs
pub trait HighScoreStore {
    /// Read the stored high score; missing or unreadable data counts as 0
    fn load(&self) -> u32;

    /// Persist a new high score
    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(contents: &str) -> Option<u32> {
        if let Ok(record) = serde_json::from_str::<HighScoreRecord>(contents) {
            return Some(record.high_score);
        }

        // A bare integer is accepted as well
        contents.trim().parse().ok()
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no high score file yet");
                return 0;
            }
            Err(err) => {
                tracing::warn!(path = ?self.path, %err, "failed to read high score, using 0");
                return 0;
            }
        };

        match Self::parse(&contents) {
            Some(high_score) => high_score,
            None => {
                tracing::warn!(path = ?self.path, "malformed high score file, using 0");
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store, for tests and for runs that should not touch the disk
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub high_score: u32,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryHighScoreStore {
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.high_score
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHighScoreStore::new(temp_dir.path().join("missing.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("high_score.json");

        let mut store = FileHighScoreStore::new(&path);
        store.save(120).unwrap();

        let reopened = FileHighScoreStore::new(&path);
        assert_eq!(reopened.load(), 120);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"high_score\": 120"));
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");

        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load(), 0);

        std::fs::write(&path, r#"{"high_score": -5}"#).unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn test_bare_integer_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");
        std::fs::write(&path, "40\n").unwrap();

        assert_eq!(FileHighScoreStore::new(&path).load(), 40);
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryHighScoreStore::with_high_score(30);
        assert_eq!(store.load(), 30);

        store.save(50).unwrap();
        assert_eq!(store.load(), 50);
        assert_eq!(store.saves, 1);
    }
}
