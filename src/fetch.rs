use std::time::Duration;

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = "site-census/0.1";

/// Per-request timeout; there is no overall crawl deadline.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetch failure, contained to the page that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connect, TLS, or the request timeout
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body is not HTML
    #[error("unexpected content type {0:?}")]
    ContentType(String),
}

/// HTTP client used for all page fetches.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { inner })
    }

    /// Fetches a page body, insisting on an HTML response.
    ///
    /// Statuses above 400 are rejected before the body is read, as is any
    /// response whose `Content-Type` does not mention `text/html`.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        ::log::debug!("GET {}", url);
        let response = self.inner.get(url).send().await?;

        let status = response.status().as_u16();
        if status > 400 {
            return Err(FetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("text/html") {
            return Err(FetchError::ContentType(content_type));
        }

        Ok(response.text().await?)
    }
}
