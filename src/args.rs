use clap::Parser;

/// Command-line surface of the crawler binary
#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(version)]
#[command(about = "Crawls a single website and writes a CSV census of its pages")]
pub struct Args {
    /// Base URL whose host bounds the crawl
    pub base_url: String,

    /// Maximum number of concurrent fetches (1-10)
    pub max_concurrency: usize,

    /// Maximum number of pages to record (1-20)
    pub max_pages: usize,
}
