//! Breakout leaderboard
//!
//! The ten best `(score, level)` runs, best first. The session ranks a run
//! when health runs out; the host may persist the board as JSON.

use std::cmp::Reverse;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Board length
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level the run ended on
    pub level: u32,
}

/// Entries sorted by descending score; among equal scores the older run ranks higher
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based rank `score` would take, or `None` if it misses the board.
    /// A zero score never ranks.
    pub fn rank_for(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= score);
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    /// Check if `score` would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        self.rank_for(score).is_some()
    }

    /// Record a finished run. Returns its rank if it made the board.
    pub fn add_score(&mut self, score: u64, level: u32) -> Option<usize> {
        let rank = self.rank_for(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, level });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Check if no run has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score on the board
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Restore ordering and length after reading an untrusted file
    fn normalize(&mut self) {
        self.entries.sort_by_key(|e| Reverse(e.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Read a board from JSON, re-sorting and trimming it
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        let mut board: HighScores = serde_json::from_str(&json)?;
        board.normalize();
        log::info!(
            "Loaded {} high scores from {}",
            board.entries.len(),
            path.display()
        );
        Ok(board)
    }

    /// Like `load`, but a missing or corrupt file yields an empty board
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            match &err {
                Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    log::info!("No leaderboard at {}", path.display())
                }
                _ => log::warn!("Discarding leaderboard at {}: {}", path.display(), err),
            }
            Self::new()
        })
    }

    /// Write the board as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Leaderboard written to {}", path.display());
        Ok(())
    }
}
