// Re-export modules
pub mod config;
pub mod crawlers;
pub mod fetch;
pub mod normalize;
pub mod parsers;
pub mod report;
pub mod results;
pub mod store;
pub mod tracker;

// Re-export commonly used types for convenience
pub use config::{ConfigError, CrawlerConfig};
pub use results::PageData;

use crate::fetch::HttpClient;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Builder for a single-site crawl.
///
/// Configure the run with the `with_*` methods, then call [`Census::run`]
/// to crawl to completion and collect the census of pages.
pub struct Census {
    base_url: String,
    config: CrawlerConfig,
}

impl Census {
    /// Create a builder for the site rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            config: CrawlerConfig::new(),
        }
    }

    /// Set the maximum number of concurrent fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the maximum number of pages to record
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Replace the whole configuration at once
    pub fn with_config(mut self, config: CrawlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = CrawlerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load the configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ConfigError> {
        let config = CrawlerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Run the crawl to completion.
    ///
    /// Fails only on configuration problems (bad limits, unusable base URL,
    /// HTTP client construction). Per-page failures never surface here; they
    /// are recorded as entries with empty content fields.
    pub async fn run(self) -> Result<HashMap<String, PageData>, ConfigError> {
        self.config.validate()?;

        let base = Url::parse(&self.base_url)?;
        if base.host_str().is_none() {
            return Err(ConfigError::MissingHost(self.base_url));
        }

        let client = HttpClient::new()?;
        Ok(crawlers::web::crawl(base, self.config, client).await)
    }
}
