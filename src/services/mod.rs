//! Service layer for the joke catalogue.
//!
//! This module contains the business logic for:
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Joke extraction (`SeparatorExtractor`, `BreakExtractor`)
//! - The in-memory catalogue (`Catalog`) and top list (`ranking`)
//! - The front-end facing service (`JokeService`)

mod catalog;
mod extractors;
mod fetcher;
mod jokes;
pub mod ranking;

pub use catalog::Catalog;
pub use extractors::{
    BreakExtractor, ContentFilter, Extractor, SeparatorExtractor, build_extractor,
};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use jokes::JokeService;
