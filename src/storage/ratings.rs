// src/storage/ratings.rs

//! Persistent like/dislike counters.

use crate::models::{JokeId, RatingMap, RatingRecord, Vote};
use crate::storage::RatingStorage;

/// In-memory ratings mirrored to a snapshot after every vote.
///
/// The in-memory map is authoritative: a failed save is logged and retried
/// implicitly by the next vote, never rolled back.
pub struct RatingStore {
    ratings: RatingMap,
    storage: Box<dyn RatingStorage>,
}

impl RatingStore {
    /// Load the snapshot from `storage`.
    ///
    /// A missing snapshot starts an empty store. An unreadable one is logged
    /// and also starts empty.
    pub async fn load(storage: Box<dyn RatingStorage>) -> Self {
        let ratings = match storage.load().await {
            Ok(Some(ratings)) => {
                log::info!(
                    "Loaded ratings for {} jokes from {}",
                    ratings.len(),
                    storage.location()
                );
                ratings
            }
            Ok(None) => {
                log::info!(
                    "No ratings found at {}, starting empty",
                    storage.location()
                );
                RatingMap::new()
            }
            Err(e) => {
                log::error!(
                    "Failed to load ratings from {}: {}. Starting empty.",
                    storage.location(),
                    e
                );
                RatingMap::new()
            }
        };

        Self { ratings, storage }
    }

    /// Count a vote, persist the full snapshot, and return the new counters.
    pub async fn record(&mut self, id: &JokeId, vote: Vote) -> RatingRecord {
        let record = self.ratings.entry(id.clone()).or_default();
        record.apply(vote);
        let updated = *record;

        match self.storage.save(&self.ratings).await {
            Ok(()) => log::debug!("Saved ratings to {}", self.storage.location()),
            Err(e) => log::error!(
                "Failed to save ratings to {}: {}",
                self.storage.location(),
                e
            ),
        }

        updated
    }

    /// Counters for `id`, zero if never rated.
    pub fn get(&self, id: &JokeId) -> RatingRecord {
        self.ratings.get(id).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> &RatingMap {
        &self.ratings
    }

    /// Number of rated jokes.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Total number of votes cast, saturating at `u64::MAX`.
    pub fn total_events(&self) -> u64 {
        self.ratings
            .values()
            .map(RatingRecord::total)
            .fold(0, u64::saturating_add)
    }
}
