use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Largest concurrency the dispatcher accepts.
pub const MAX_CONCURRENCY: usize = 10;

/// Largest page cap a run accepts.
pub const MAX_PAGES: usize = 20;

/// Configuration for a crawl run
///
/// Immutable once the crawl starts; validated rather than clamped, so
/// out-of-range values are rejected up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent fetches
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of pages recorded before tasks stop fetching
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

/// A configuration problem; the only error class that ends the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("maxConcurrency must be between 1 and 10, got {0}")]
    ConcurrencyOutOfRange(usize),

    #[error("maxPages must be between 1 and 20, got {0}")]
    PageCapOutOfRange(usize),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("base URL {0:?} has no host")]
    MissingHost(String),

    #[error("failed to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CrawlerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            max_pages: default_max_pages(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }

    /// Check the limits the crawl contract imposes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::ConcurrencyOutOfRange(self.max_concurrency));
        }
        if self.max_pages == 0 || self.max_pages > MAX_PAGES {
            return Err(ConfigError::PageCapOutOfRange(self.max_pages));
        }
        Ok(())
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}

/// Default value for max_pages
fn default_max_pages() -> usize {
    20
}
