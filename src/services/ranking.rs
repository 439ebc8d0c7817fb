// src/services/ranking.rs

//! Top list by net score.

use crate::models::{RatingMap, RatingRecord, TopEntry};
use crate::services::Catalog;

/// Rank rated jokes by net score, best first.
///
/// Ties keep the rating map's insertion order. Rated identifiers with no
/// joke in the current catalogue are skipped, so the list can be shorter
/// than `n`.
pub fn rank(ratings: &RatingMap, catalog: &Catalog, n: usize) -> Vec<TopEntry> {
    let index = catalog.index();

    let mut scored: Vec<(&RatingRecord, &str)> = ratings
        .iter()
        .filter_map(|(id, record)| index.get(id).map(|&joke| (record, joke.text.as_str())))
        .collect();
    scored.sort_by(|a, b| b.0.net_score().cmp(&a.0.net_score()));

    scored
        .into_iter()
        .take(n)
        .map(|(record, text)| TopEntry {
            text: text.to_string(),
            net_score: record.net_score(),
            likes: record.likes,
            dislikes: record.dislikes,
        })
        .collect()
}
