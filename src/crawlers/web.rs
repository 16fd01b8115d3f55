use crate::config::CrawlerConfig;
use crate::fetch::HttpClient;
use crate::normalize::{normalize_url, trim_trailing_slash};
use crate::parsers::html;
use crate::results::PageData;
use crate::store::PageStore;
use crate::tracker::TaskCounter;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Shared state for one crawl run, handed to every task behind an `Arc`.
struct CrawlState {
    config: CrawlerConfig,
    base: Url,
    client: HttpClient,
    store: PageStore,
    fetch_slots: Semaphore,
    tasks: TaskCounter,
}

/// Crawls the site rooted at `base` to completion and returns the pages
/// keyed by normalized URL.
///
/// Returns once every spawned task has finished, so no task is still
/// touching the store when the map is drained.
pub async fn crawl(
    base: Url,
    config: CrawlerConfig,
    client: HttpClient,
) -> HashMap<String, PageData> {
    ::log::info!(
        "Starting crawl of {} (max {} concurrent fetches, {} page cap)",
        base,
        config.max_concurrency,
        config.max_pages
    );

    let state = Arc::new(CrawlState {
        fetch_slots: Semaphore::new(config.max_concurrency),
        tasks: TaskCounter::new(),
        store: PageStore::new(),
        client,
        base,
        config,
    });

    let seed = state.base.as_str().to_string();
    spawn_task(Arc::clone(&state), seed);
    state.tasks.wait().await;

    let pages = state.store.take_pages();
    ::log::info!("Crawl of {} finished with {} pages", state.base, pages.len());
    pages
}

/// Registers a task with the completion tracker, then spawns it.
///
/// The counter must be incremented before the spawn so the run cannot be
/// observed as complete while a just-forked task is still unstarted. A
/// plain function (not async) keeps the recursive spawn from tying the
/// task future's type into itself.
fn spawn_task(state: Arc<CrawlState>, candidate_url: String) {
    let task = state.tasks.add();
    tokio::spawn(async move {
        let _task = task;
        process_url(&state, &candidate_url).await;
    });
}

/// Runs the decision sequence for one candidate URL.
async fn process_url(state: &Arc<CrawlState>, candidate_url: &str) {
    // Cap check comes before any other work. The check and the later
    // reservation are separate critical sections, so a burst of tasks can
    // overshoot the cap slightly; that slack is accepted.
    if state.store.len() >= state.config.max_pages {
        ::log::debug!("Page cap reached, dropping {candidate_url}");
        return;
    }

    let page_url = match Url::parse(candidate_url) {
        Ok(url) => url,
        Err(e) => {
            ::log::warn!("Skipping unparseable URL {candidate_url:?}: {e}");
            return;
        }
    };

    // Host scope: only pages on the seed's host are crawled or recorded.
    if page_url.host_str() != state.base.host_str() {
        ::log::trace!("Off-host link not followed: {page_url}");
        return;
    }

    let key = match normalize_url(page_url.as_str()) {
        Ok(key) => key,
        Err(e) => {
            ::log::warn!("Skipping {page_url}: {e}");
            return;
        }
    };

    let page_url_string = trim_trailing_slash(page_url.as_str()).to_string();
    if !state.store.try_reserve(&key, &page_url_string) {
        ::log::trace!("Already claimed {key}, skipping");
        return;
    }

    // Only the network round trip holds a fetch slot. Parsing and link
    // forking run after the permit is back in the pool.
    let permit = state
        .fetch_slots
        .acquire()
        .await
        .expect("fetch semaphore never closed");
    ::log::debug!("Fetching {page_url}");
    let fetched = state.client.fetch_html(page_url.as_str()).await;
    drop(permit);

    let body = match fetched {
        Ok(body) => body,
        Err(e) => {
            // The reservation stands: the page keeps its slot in the
            // results with empty content and is never retried.
            ::log::warn!("Fetch of {page_url} failed: {e}");
            state.store.commit(&key, PageData::with_url(page_url_string));
            return;
        }
    };

    let page = html::extract_page_data(&body, &page_url);
    let outgoing_links = page.outgoing_links.clone();
    ::log::debug!(
        "Crawled {} ({} links, {} images)",
        page.url,
        outgoing_links.len(),
        page.image_urls.len()
    );
    state.store.commit(&key, page);

    // Fork one task per extracted link, in document order.
    for link in outgoing_links {
        spawn_task(Arc::clone(state), link);
    }
}
