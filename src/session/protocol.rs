//! Wire messages exchanged with game clients
//!
//! Every message is one JSON object on its own line.

use crate::stats::Stats;
use serde::{Deserialize, Serialize};

/// Requests accepted outside of a running game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ControlRequest {
    /// Start a game on this connection
    Play,
    /// Read today's aggregate statistics
    GetStats,
}

/// One guess inside a running game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

impl GuessRequest {
    #[must_use]
    pub fn new(guess: impl Into<String>) -> Self {
        Self {
            guess: guess.into(),
        }
    }

    /// Decode one raw guess line
    ///
    /// A missing `guess` field decodes as an empty guess.
    ///
    /// # Errors
    /// Returns the JSON error for malformed lines, including lines that are not UTF-8.
    pub fn decode(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }
}

/// Aggregate statistics as reported to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub players: u32,
    pub winner_percentage: f64,
    pub average_guesses: f64,
}

impl From<&Stats> for StatsResponse {
    fn from(stats: &Stats) -> Self {
        Self {
            players: stats.total_players,
            winner_percentage: stats.win_percentage(),
            average_guesses: stats.average_guesses(),
        }
    }
}

/// Reply to a request that could not be served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
