//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::{ContentFilter, build_extractor};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior shared by every source
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Entry filtering applied by every extractor
    #[serde(default)]
    pub filter: FilterConfig,

    /// Joke sources in merge priority order
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SourceConfig>,

    /// Rating persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// User-facing fallback texts
    #[serde(default)]
    pub messages: MessageConfig,

    /// Top list settings
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Every source extractor is compiled once, so bad patterns and
    /// selectors are reported here.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No sources defined"));
        }

        let filter = ContentFilter::new(&self.filter);
        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(AppError::validation("Source with empty name"));
            }
            if !names.insert(source.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate source name '{}'",
                    source.name
                )));
            }
            url::Url::parse(&source.url)?;
            build_extractor(&source.extractor, filter.clone())?;
        }

        if self.storage.ratings_file.trim().is_empty() {
            return Err(AppError::validation("storage.ratings_file is empty"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            filter: FilterConfig::default(),
            sources: defaults::sources(),
            storage: StorageConfig::default(),
            messages: MessageConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

/// Shared HTTP header set and timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Length and keyword filtering for extracted entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Entries must be strictly longer than this many characters
    #[serde(default = "defaults::min_length")]
    pub min_length: usize,

    /// Navigation/UI terms; matching is case-insensitive
    #[serde(default = "defaults::blacklist")]
    pub blacklist: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_length: defaults::min_length(),
            blacklist: defaults::blacklist(),
        }
    }
}

/// A single joke source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Name used in logs
    pub name: String,

    /// Page to fetch
    pub url: String,

    /// How to cut the page into entries
    pub extractor: ExtractorConfig,
}

/// Page shape of a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorConfig {
    /// Plain page text split on a separator pattern
    Separator {
        #[serde(default = "defaults::separator_pattern")]
        pattern: String,
    },
    /// Entry elements grouped between break elements
    Breaks {
        #[serde(default = "defaults::entry_selector")]
        entry_selector: String,
        #[serde(default = "defaults::break_selector")]
        break_selector: String,
    },
}

/// Rating persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file, relative to the storage directory
    #[serde(default = "defaults::ratings_file")]
    pub ratings_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            ratings_file: defaults::ratings_file(),
        }
    }
}

/// User-facing texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Returned in place of a joke when the catalogue is empty
    #[serde(default = "defaults::no_content")]
    pub no_content: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            no_content: defaults::no_content(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Length of the top list
    #[serde(default = "defaults::top_n")]
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: defaults::top_n(),
        }
    }
}

mod defaults {
    use super::{ExtractorConfig, SourceConfig};

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "ru-RU,ru;q=0.8,en-US;q=0.5,en;q=0.3".into()
    }
    pub fn timeout() -> u64 {
        15
    }

    // Filter defaults
    pub fn min_length() -> usize {
        20
    }
    pub fn blacklist() -> Vec<String> {
        [
            "меню",
            "контакты",
            "поиск",
            "читать",
            "подписка",
            "каталог",
            "купить",
            "скачать",
            "оглавление",
            "автор:",
            "жанры и теги",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Extractor defaults
    pub fn separator_pattern() -> String {
        r"\*\s*\*\s*\*".into()
    }
    pub fn entry_selector() -> String {
        "p".into()
    }
    pub fn break_selector() -> String {
        "img".into()
    }

    pub fn sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                name: "kartaslov".into(),
                url: "https://kartaslov.ru/книги/Самые_убойные_анекдоты".into(),
                extractor: ExtractorConfig::Separator {
                    pattern: separator_pattern(),
                },
            },
            SourceConfig {
                name: "litres".into(),
                url: "https://www.litres.ru/book/raznoe-47672/samye-smeshnye-anekdoty-23556560/chitat-onlayn/".into(),
                extractor: ExtractorConfig::Breaks {
                    entry_selector: entry_selector(),
                    break_selector: break_selector(),
                },
            },
        ]
    }

    // Storage defaults
    pub fn ratings_file() -> String {
        "joke_ratings.json".into()
    }

    // Message defaults
    pub fn no_content() -> String {
        "Извините, не удалось найти анекдоты. Попробуйте позже.".into()
    }

    // Ranking defaults
    pub fn top_n() -> usize {
        5
    }
}
