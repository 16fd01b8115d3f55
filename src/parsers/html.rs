use crate::normalize::trim_trailing_slash;
use crate::results::PageData;
use scraper::{Html, Selector};
use url::Url;

/// Extracts a full page record from an HTML body.
///
/// `page_url` is the page's own URL and the base against which relative
/// references are resolved.
pub fn extract_page_data(html: &str, page_url: &Url) -> PageData {
    let doc = Html::parse_document(html);

    PageData {
        url: trim_trailing_slash(page_url.as_str()).to_string(),
        h1: h1_text(&doc),
        first_paragraph: first_paragraph_text(&doc),
        outgoing_links: link_urls(&doc, page_url),
        image_urls: image_urls(&doc, page_url),
    }
}

/// Text of the first h1 element's subtree, or empty if the page has none.
pub fn h1_text(doc: &Html) -> String {
    let selector = Selector::parse("h1").unwrap();
    doc.select(&selector)
        .next()
        .map(|heading| heading.text().collect::<String>())
        .unwrap_or_default()
}

/// Text of the page's first paragraph.
///
/// When a `main` element exists the search is confined to it, even if that
/// leaves the result empty; otherwise the first paragraph anywhere wins.
pub fn first_paragraph_text(doc: &Html) -> String {
    let main_selector = Selector::parse("main").unwrap();
    let paragraph_selector = if doc.select(&main_selector).next().is_some() {
        Selector::parse("main p").unwrap()
    } else {
        Selector::parse("p").unwrap()
    };

    doc.select(&paragraph_selector)
        .next()
        .map(|paragraph| paragraph.text().collect::<String>())
        .unwrap_or_default()
}

/// Absolute link targets in document order, resolved against the page URL.
pub fn link_urls(doc: &Html, page_url: &Url) -> Vec<String> {
    collect_references(doc, page_url, "a[href]", "href")
}

/// Absolute image sources in document order, resolved against the page URL.
pub fn image_urls(doc: &Html, page_url: &Url) -> Vec<String> {
    collect_references(doc, page_url, "img[src]", "src")
}

/// Resolves every matching attribute against the page URL, skipping
/// references the URL parser rejects.
fn collect_references(doc: &Html, page_url: &Url, selector: &str, attribute: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();

    doc.select(&selector)
        .filter_map(|element| element.value().attr(attribute))
        .filter_map(|target| match page_url.join(target) {
            Ok(resolved) => Some(trim_trailing_slash(resolved.as_str()).to_string()),
            Err(e) => {
                ::log::debug!("Skipping unresolvable reference {:?}: {}", target, e);
                None
            }
        })
        .collect()
}
