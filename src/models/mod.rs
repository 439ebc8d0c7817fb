// src/models/mod.rs

//! Domain models for the joke catalogue.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

use chrono::{DateTime, Utc};

mod config;
mod joke;
mod rating;

// Re-export all public types
pub use config::{
    Config, ExtractorConfig, FetchConfig, FilterConfig, MessageConfig, RankingConfig,
    SourceConfig, StorageConfig,
};
pub use joke::{Joke, JokeId};
pub use rating::{RatingMap, RatingRecord, Vote};

/// A joke picked for display, or the fallback text when nothing is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeReply {
    pub text: String,
    /// `None` means the catalogue is empty and `text` is the fallback message
    pub id: Option<JokeId>,
}

/// One line of the top list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TopEntry {
    pub text: String,
    pub net_score: i64,
    pub likes: u64,
    pub dislikes: u64,
}

/// Usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    pub total_items: usize,
    pub total_rating_events: u64,
    /// Supplied by the caller, which tracks users itself
    pub distinct_rated_users: usize,
    /// When the catalogue was filled, `None` while it is empty
    pub acquired_at: Option<DateTime<Utc>>,
}
