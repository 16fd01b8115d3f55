use clap::Parser;
use site_census::{Census, ConfigError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to crawl
    #[arg(short, long)]
    url: String,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long)]
    config_file: Option<String>,

    /// Maximum number of concurrent fetches
    #[arg(short = 'n', long)]
    concurrency: Option<usize>,

    /// Maximum number of pages to record
    #[arg(short, long)]
    pages: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting census for URL: {}", args.url);

    let mut census = Census::new(args.url.as_str());

    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {config_file}");
        census = census.with_config_file(config_file)?;
    }

    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        census = census.with_config_str(&config_str)?;
    }

    if let Some(concurrency) = args.concurrency {
        census = census.with_max_concurrency(concurrency);
    }

    if let Some(pages) = args.pages {
        census = census.with_max_pages(pages);
    }

    let start_time = std::time::Instant::now();
    let pages = census.run().await?;

    println!(
        "Census complete. Collected {} pages in {:.2} seconds.",
        pages.len(),
        start_time.elapsed().as_secs_f64()
    );

    let mut keys: Vec<&String> = pages.keys().collect();
    keys.sort();
    for key in keys {
        let page = &pages[key];
        println!(
            "{key} -> h1: {:?}, {} links, {} images",
            page.h1,
            page.outgoing_links.len(),
            page.image_urls.len()
        );
    }

    Ok(())
}
