//! High score leaderboard
//!
//! Kept for the lifetime of the process, tracks the top 10 finished runs.

use serde::{Deserialize, Serialize};

use crate::sim::OverReason;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Seconds survived
    pub score: f32,
    /// Simulation ticks survived
    pub ticks: u64,
    /// How the run ended
    pub reason: OverReason,
}

/// High score leaderboard (sorted descending by score)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: f32) -> bool {
        if score <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run if it qualifies; returns the rank achieved
    pub fn add_score(&mut self, score: f32, ticks: u64, reason: OverReason) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            ticks,
            reason,
        };

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f32> {
        self.entries.first().map(|e| e.score)
    }
}
