use clap::Parser;
use site_census::Census;
use site_census::report;

mod args;

use args::Args;

const REPORT_PATH: &str = "report.csv";

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let start_time = std::time::Instant::now();

    let census = Census::new(args.base_url.as_str())
        .with_max_concurrency(args.max_concurrency)
        .with_max_pages(args.max_pages);

    let pages = match census.run().await {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Usage: crawler <base_url> <max_concurrency> <max_pages>");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    ::log::info!(
        "Collected {} pages in {:.2} seconds",
        pages.len(),
        start_time.elapsed().as_secs_f64()
    );

    match report::write_csv_report(&pages, REPORT_PATH) {
        Ok(()) => println!("Wrote {} pages to {REPORT_PATH}", pages.len()),
        Err(e) => ::log::error!("Failed to write {REPORT_PATH}: {e}"),
    }
}
