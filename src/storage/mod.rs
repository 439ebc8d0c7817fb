//! Storage abstractions for rating persistence.
//!
//! Ratings are kept as one snapshot, rewritten in full after every vote:
//!
//! ```text
//! storage/
//! ├── config.toml           # Configuration
//! └── joke_ratings.json     # { "<joke id>": { "likes": 3, "dislikes": 1 }, ... }
//! ```

pub mod local;
pub mod ratings;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RatingMap;

// Re-export for convenience
pub use local::LocalStorage;
pub use ratings::RatingStore;

/// Trait for rating snapshot backends.
#[async_trait]
pub trait RatingStorage: Send + Sync {
    /// Read the snapshot. `Ok(None)` means no snapshot has been written yet.
    async fn load(&self) -> Result<Option<RatingMap>>;

    /// Replace the snapshot with `ratings`.
    async fn save(&self, ratings: &RatingMap) -> Result<()>;

    /// Where the snapshot lives, for logs.
    fn location(&self) -> String;
}
