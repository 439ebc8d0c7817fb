// src/pipeline/acquire.rs

//! Joke acquisition: fetch every source concurrently and merge the results.

use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{Config, Joke};
use crate::services::{ContentFilter, Extractor, PageFetcher, build_extractor};

/// A configured source with its compiled extractor.
pub struct Source {
    pub name: String,
    pub url: String,
    extractor: Box<dyn Extractor>,
}

impl Source {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        extractor: Box<dyn Extractor>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            extractor,
        }
    }
}

/// Summary of one acquisition cycle.
#[derive(Debug, Default)]
pub struct AcquisitionOutcome {
    /// Merged jokes in source priority order
    pub jokes: Vec<Joke>,
    pub source_total: usize,
    pub source_failures: usize,
}

/// Runs acquisition cycles over the configured sources.
pub struct Acquirer {
    sources: Vec<Source>,
    fetcher: Box<dyn PageFetcher>,
}

impl Acquirer {
    /// Compile every configured source.
    pub fn new(config: &Config, fetcher: Box<dyn PageFetcher>) -> Result<Self> {
        let filter = ContentFilter::new(&config.filter);
        let sources = config
            .sources
            .iter()
            .map(|source| {
                let extractor = build_extractor(&source.extractor, filter.clone())?;
                Ok(Source::new(&source.name, &source.url, extractor))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::with_sources(sources, fetcher))
    }

    /// Use already built sources; their order is the merge order.
    pub fn with_sources(sources: Vec<Source>, fetcher: Box<dyn PageFetcher>) -> Self {
        Self { sources, fetcher }
    }

    /// Fetch and extract all sources concurrently, then merge in declared
    /// order. Failed sources are logged and contribute nothing.
    pub async fn acquire(&self) -> AcquisitionOutcome {
        let results =
            join_all(self.sources.iter().map(|source| self.acquire_source(source))).await;

        let mut outcome = AcquisitionOutcome {
            source_total: self.sources.len(),
            ..AcquisitionOutcome::default()
        };

        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(entries) => {
                    log::info!("Found {} jokes on {}", entries.len(), source.name);
                    outcome.jokes.extend(entries.into_iter().map(Joke::new));
                }
                Err(error) => {
                    outcome.source_failures += 1;
                    log::error!("Failed to acquire jokes from {}: {}", source.name, error);
                }
            }
        }

        if outcome.jokes.is_empty() {
            log::error!("No jokes could be acquired from any source");
        } else {
            log::info!("Total jokes acquired: {}", outcome.jokes.len());
        }

        outcome
    }

    async fn acquire_source(&self, source: &Source) -> Result<Vec<String>> {
        log::info!("Fetching jokes from {} ({})", source.name, source.url);
        let html = self
            .fetcher
            .fetch(&source.url)
            .await
            .map_err(|e| AppError::source_failed(&source.name, e))?;
        log::debug!("Fetched {} bytes from {}", html.len(), source.name);

        Ok(source.extractor.extract(&html))
    }
}
