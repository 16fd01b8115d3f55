use crate::results::PageData;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Shared record of every page the crawl has claimed, keyed by normalized URL.
///
/// The store is the single source of truth for "seen" state: a key is
/// reserved exactly once, before its fetch starts, and later overwritten
/// with the extracted content. Reservation and membership testing happen
/// under one lock acquisition so that no two tasks can claim the same key.
/// Critical sections are plain map operations and never held across an
/// await, so a blocking mutex is enough.
pub struct PageStore {
    pages: Mutex<HashMap<String, PageData>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically claims `key` if it is not already present.
    ///
    /// On success a placeholder entry (URL only) is inserted and `true` is
    /// returned; if the key is already present nothing changes and `false`
    /// is returned. This is the sole deduplication gate for the crawl.
    pub fn try_reserve(&self, key: &str, url: &str) -> bool {
        let mut pages = self.lock();
        if pages.contains_key(key) {
            return false;
        }
        pages.insert(key.to_string(), PageData::with_url(url));
        true
    }

    /// Replaces the entry for an already-reserved key with its final data.
    ///
    /// Committing a key that was never reserved is a contract violation.
    pub fn commit(&self, key: &str, data: PageData) {
        let previous = self.lock().insert(key.to_string(), data);
        debug_assert!(previous.is_some(), "commit for unreserved key {key}");
    }

    /// Number of reserved keys, used to test the page-count cap.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains the final crawl result once all tasks have finished.
    pub fn take_pages(&self) -> HashMap<String, PageData> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PageData>> {
        self.pages.lock().expect("page map lock poisoned")
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
