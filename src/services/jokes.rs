// src/services/jokes.rs

//! Joke service: the catalogue and ratings behind one handle.
//!
//! This is what a chat front end talks to. It owns the catalogue and the
//! rating store; callers only go through the methods below.

use std::path::Path;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{Config, Joke, JokeId, JokeReply, RatingRecord, Stats, TopEntry, Vote};
use crate::pipeline::Acquirer;
use crate::services::{Catalog, HttpFetcher, ranking};
use crate::storage::{LocalStorage, RatingStorage, RatingStore};

/// Service owning the joke catalogue and the rating store.
pub struct JokeService {
    acquirer: Acquirer,
    catalog: Mutex<Catalog>,
    ratings: Mutex<RatingStore>,
    no_content: String,
}

impl JokeService {
    /// Wire the HTTP fetcher and the snapshot under `storage_dir`, then
    /// load the ratings.
    pub async fn open(config: &Config, storage_dir: &Path) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let acquirer = Acquirer::new(config, Box::new(fetcher))?;
        let storage = LocalStorage::new(storage_dir.join(&config.storage.ratings_file));
        Ok(Self::new(config, acquirer, Box::new(storage)).await)
    }

    /// Build from injected parts.
    pub async fn new(
        config: &Config,
        acquirer: Acquirer,
        storage: Box<dyn RatingStorage>,
    ) -> Self {
        Self {
            acquirer,
            catalog: Mutex::new(Catalog::default()),
            ratings: Mutex::new(RatingStore::load(storage).await),
            no_content: config.messages.no_content.clone(),
        }
    }

    /// Random joke with its id, or the fallback text and no id.
    pub async fn random_joke(&self) -> JokeReply {
        match self.pick().await {
            Some(joke) => JokeReply {
                text: joke.text,
                id: Some(joke.id),
            },
            None => JokeReply {
                text: self.no_content.clone(),
                id: None,
            },
        }
    }

    /// Pick a random joke, acquiring the catalogue first if it is empty.
    pub async fn pick(&self) -> Option<Joke> {
        let mut catalog = self.catalog.lock().await;
        Self::ensure_populated(&self.acquirer, &mut catalog).await;

        let joke = catalog.pick().cloned();
        match &joke {
            Some(joke) => log::debug!(
                "Picked joke {} ({} chars)",
                joke.id,
                joke.text.chars().count()
            ),
            None => log::error!("Joke catalogue is empty"),
        }
        joke
    }

    /// Count a vote for `id` and return its updated counters.
    pub async fn rate(&self, id: &JokeId, vote: Vote) -> RatingRecord {
        let record = self.ratings.lock().await.record(id, vote).await;
        log::info!(
            "Recorded {vote} for {id}: {} likes, {} dislikes",
            record.likes,
            record.dislikes
        );
        record
    }

    /// Current counters for `id`.
    pub async fn rating(&self, id: &JokeId) -> RatingRecord {
        self.ratings.lock().await.get(id)
    }

    /// Best `n` jokes of the current catalogue by net score.
    ///
    /// Does not trigger acquisition; rated jokes that are not in the
    /// catalogue are left out.
    pub async fn top(&self, n: usize) -> Vec<TopEntry> {
        let catalog = self.catalog.lock().await;
        let ratings = self.ratings.lock().await;
        ranking::rank(ratings.snapshot(), &catalog, n)
    }

    /// Usage counters; `distinct_rated_users` comes from the caller.
    pub async fn stats(&self, distinct_rated_users: usize) -> Stats {
        let (total_items, acquired_at) = {
            let catalog = self.catalog.lock().await;
            (catalog.len(), catalog.acquired_at())
        };
        let total_rating_events = self.ratings.lock().await.total_events();
        Stats {
            total_items,
            total_rating_events,
            distinct_rated_users,
            acquired_at,
        }
    }

    /// Fill the catalogue unless it already holds jokes.
    ///
    /// An empty acquisition leaves it empty, so the next demand tries again.
    pub async fn load_catalog(&self) -> usize {
        let mut catalog = self.catalog.lock().await;
        Self::ensure_populated(&self.acquirer, &mut catalog).await;
        catalog.len()
    }

    async fn ensure_populated(acquirer: &Acquirer, catalog: &mut Catalog) {
        if !catalog.is_empty() {
            return;
        }
        let outcome = acquirer.acquire().await;
        if !outcome.jokes.is_empty() {
            *catalog = Catalog::new(outcome.jokes);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::pipeline::Source;
    use crate::services::{ContentFilter, PageFetcher, SeparatorExtractor};

    /// Serves canned pages and counts requests.
    struct StubFetcher {
        pages: HashMap<String, String>,
        requests: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> crate::error::Result<String> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or_else(|| AppError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    const JOKE_X: &str = "Joke X: a horse walks into a bar";
    const JOKE_Y: &str = "Joke Y: two programmers meet at a party";

    struct Fixture {
        _tmp: TempDir,
        service: JokeService,
        requests: Arc<AtomicUsize>,
    }

    async fn fixture(pages: &[(&str, &str)]) -> Fixture {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let filter = ContentFilter::new(&config.filter);
        let sources = ["http://one.test/", "http://two.test/"]
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let extractor =
                    SeparatorExtractor::new(r"\*\s*\*\s*\*", filter.clone()).unwrap();
                Source::new(format!("source-{i}"), *url, Box::new(extractor))
            })
            .collect();

        let requests = Arc::new(AtomicUsize::new(0));
        let fetcher = StubFetcher {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            requests: Arc::clone(&requests),
        };
        let acquirer = Acquirer::with_sources(sources, Box::new(fetcher));
        let storage = LocalStorage::new(tmp.path().join("joke_ratings.json"));
        let service = JokeService::new(&config, acquirer, Box::new(storage)).await;

        Fixture {
            _tmp: tmp,
            service,
            requests,
        }
    }

    fn page(jokes: &[&str]) -> String {
        format!("<body>{}</body>", jokes.join(" * * * "))
    }

    #[tokio::test]
    async fn test_empty_catalogue_falls_back() {
        let fx = fixture(&[]).await;
        let reply = fx.service.random_joke().await;

        assert_eq!(reply.id, None);
        assert_eq!(reply.text, Config::default().messages.no_content);
    }

    #[tokio::test]
    async fn test_empty_acquisition_is_retried() {
        let fx = fixture(&[]).await;
        fx.service.random_joke().await;
        fx.service.random_joke().await;

        assert_eq!(fx.requests.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_catalogue_is_acquired_once() {
        let page_one = page(&[JOKE_X]);
        let page_two = page(&[JOKE_Y]);
        let fx = fixture(&[
            ("http://one.test/", page_one.as_str()),
            ("http://two.test/", page_two.as_str()),
        ])
        .await;

        for _ in 0..5 {
            let reply = fx.service.random_joke().await;
            let id = reply.id.unwrap();
            assert_eq!(id, JokeId::of(&reply.text));
        }
        assert_eq!(fx.requests.load(Ordering::SeqCst), 2);
        assert_eq!(fx.service.load_catalog().await, 2);
        assert_eq!(fx.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_partial_failure_still_serves_jokes() {
        let page_two = page(&[JOKE_Y]);
        let fx = fixture(&[("http://two.test/", page_two.as_str())]).await;

        let reply = fx.service.random_joke().await;
        assert_eq!(reply.text, JOKE_Y);
        assert_eq!(reply.id, Some(JokeId::of(JOKE_Y)));
    }

    #[tokio::test]
    async fn test_rating_then_ranking() {
        let page_one = page(&[JOKE_X, JOKE_Y]);
        let fx = fixture(&[("http://one.test/", page_one.as_str())]).await;
        fx.service.load_catalog().await;

        let x = JokeId::of(JOKE_X);
        let y = JokeId::of(JOKE_Y);
        fx.service.rate(&x, Vote::Like).await;
        fx.service.rate(&x, Vote::Like).await;
        fx.service.rate(&y, Vote::Dislike).await;

        let top = fx.service.top(2).await;
        assert_eq!(
            top,
            vec![
                TopEntry {
                    text: JOKE_X.to_string(),
                    net_score: 2,
                    likes: 2,
                    dislikes: 0,
                },
                TopEntry {
                    text: JOKE_Y.to_string(),
                    net_score: -1,
                    likes: 0,
                    dislikes: 1,
                },
            ]
        );
        assert_eq!(
            fx.service.rating(&x).await,
            RatingRecord {
                likes: 2,
                dislikes: 0
            }
        );
    }

    #[tokio::test]
    async fn test_rank_skips_jokes_missing_from_catalogue() {
        let page_one = page(&[JOKE_Y]);
        let fx = fixture(&[("http://one.test/", page_one.as_str())]).await;
        fx.service.load_catalog().await;

        let z = JokeId::of("Joke Z: scraped in an earlier run only");
        fx.service.rate(&z, Vote::Like).await;
        fx.service.rate(&z, Vote::Like).await;
        fx.service.rate(&JokeId::of(JOKE_Y), Vote::Like).await;

        let top = fx.service.top(1).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].text, JOKE_Y);
    }

    #[tokio::test]
    async fn test_stats() {
        let page_one = page(&[JOKE_X, JOKE_Y]);
        let fx = fixture(&[("http://one.test/", page_one.as_str())]).await;
        fx.service.load_catalog().await;
        fx.service.rate(&JokeId::of(JOKE_X), Vote::Like).await;
        fx.service.rate(&JokeId::of(JOKE_X), Vote::Dislike).await;

        let stats = fx.service.stats(3).await;
        assert!(stats.acquired_at.is_some());
        assert_eq!(
            stats,
            Stats {
                total_items: 2,
                total_rating_events: 2,
                distinct_rated_users: 3,
                acquired_at: stats.acquired_at,
            }
        );
    }

    #[tokio::test]
    async fn test_stats_before_acquisition() {
        let fx = fixture(&[]).await;
        let stats = fx.service.stats(0).await;

        assert_eq!(stats, Stats::default());
        assert_eq!(fx.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ratings_survive_restart() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("joke_ratings.json");
        let config = Config::default();
        let id = JokeId::of(JOKE_X);

        for expected in 1..=2 {
            let fetcher = StubFetcher {
                pages: HashMap::new(),
                requests: Arc::new(AtomicUsize::new(0)),
            };
            let acquirer = Acquirer::with_sources(Vec::new(), Box::new(fetcher));
            let service =
                JokeService::new(&config, acquirer, Box::new(LocalStorage::new(&path))).await;
            let record = service.rate(&id, Vote::Like).await;
            assert_eq!(record.likes, expected);
        }
    }
}
