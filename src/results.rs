use serde::{Deserialize, Serialize};

/// Represents a crawled page with its URL and extracted content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    /// URL of the page
    pub url: String,

    /// Text of the page's first h1 heading (empty if none)
    #[serde(default)]
    pub h1: String,

    /// Text of the page's first paragraph (empty if none)
    #[serde(default)]
    pub first_paragraph: String,

    /// Absolute link targets discovered on the page, in document order
    #[serde(default)]
    pub outgoing_links: Vec<String>,

    /// Absolute image sources discovered on the page, in document order
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl PageData {
    /// Create a new page data instance
    pub fn new(
        url: String,
        h1: String,
        first_paragraph: String,
        outgoing_links: Vec<String>,
        image_urls: Vec<String>,
    ) -> Self {
        Self {
            url,
            h1,
            first_paragraph,
            outgoing_links,
            image_urls,
        }
    }

    /// Create a placeholder entry carrying only the URL.
    ///
    /// This is the shape stored when a key is reserved and the shape a page
    /// keeps permanently when its fetch fails.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}
