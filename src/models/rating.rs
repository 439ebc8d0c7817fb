//! Rating counters.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::JokeId;

/// Ratings keyed by joke, in insertion order.
pub type RatingMap = IndexMap<JokeId, RatingRecord>;

/// Like/dislike counters for one joke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub likes: u64,
    pub dislikes: u64,
}

impl RatingRecord {
    /// Likes minus dislikes, clamped to the `i64` range.
    pub fn net_score(&self) -> i64 {
        let net = i128::from(self.likes) - i128::from(self.dislikes);
        net.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Number of votes cast, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.likes.saturating_add(self.dislikes)
    }

    /// Count one vote.
    pub fn apply(&mut self, vote: Vote) {
        match vote {
            Vote::Like => self.likes = self.likes.saturating_add(1),
            Vote::Dislike => self.dislikes = self.dislikes.saturating_add(1),
        }
    }
}

/// A single rating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl FromStr for Vote {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" | "up" | "+" => Ok(Vote::Like),
            "dislike" | "down" | "-" => Ok(Vote::Dislike),
            other => Err(AppError::validation(format!("Unknown vote '{other}'"))),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Like => f.write_str("like"),
            Vote::Dislike => f.write_str("dislike"),
        }
    }
}
