use crate::results::PageData;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Column order of the report.
const HEADER: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

/// Writes the crawl result as CSV, one row per page.
///
/// List-valued fields are joined with `;`. Rows are sorted by key so the
/// report is deterministic regardless of crawl completion order.
pub fn write_csv<W: io::Write>(
    pages: &HashMap<String, PageData>,
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    let mut keys: Vec<&String> = pages.keys().collect();
    keys.sort();

    for key in keys {
        let page = &pages[key];
        let outgoing_links = page.outgoing_links.join(";");
        let image_urls = page.image_urls.join(";");
        writer.write_record([
            page.url.as_str(),
            page.h1.as_str(),
            page.first_paragraph.as_str(),
            outgoing_links.as_str(),
            image_urls.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the crawl result to a CSV file at `path`.
pub fn write_csv_report<P: AsRef<Path>>(
    pages: &HashMap<String, PageData>,
    path: P,
) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv(pages, file)
}
