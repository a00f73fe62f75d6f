//! Session-scoped page cache.
//!
//! [`PageCache`] memoizes fetched pages for the lifetime of a session, keyed
//! by page offset. A hit returns the stored page without contacting the data
//! source; a miss delegates, stores, and returns. Entries are never evicted
//! individually; [`clear`](PageCache::clear) discards everything and is
//! called exactly once per reset, before any fetch of the new epoch begins.
//!
//! The cache never mutates the list store or any other component; its only
//! side effect is its own storage.

use crate::domain::{Item, Result};
use crate::source::backend::DataSource;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct CacheInner {
    /// Bumped by `clear()`. A miss-fetch records the generation it started
    /// under and only stores its page if no clear happened in between, so a
    /// reset can never be re-polluted by a pre-reset page.
    generation: u64,
    pages: HashMap<usize, Vec<Item>>,
}

/// Memoizing wrapper around a [`DataSource`].
pub struct PageCache<S> {
    source: S,
    inner: Mutex<CacheInner>,
}

impl<S: DataSource> PageCache<S> {
    /// Creates an empty cache delegating misses to `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(CacheInner {
                generation: 0,
                pages: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the page at `offset`, fetching it on a miss.
    ///
    /// The lock is not held while the source is consulted, so concurrent
    /// callers (a pending load-more overlapped by a reset) never serialize
    /// their fetches through the cache.
    ///
    /// # Errors
    ///
    /// A data-source failure propagates unchanged; nothing is retried or
    /// cached on the failure path.
    pub async fn get_or_fetch(&self, offset: usize, limit: usize) -> Result<Vec<Item>> {
        let generation = {
            let inner = self.lock();
            if let Some(page) = inner.pages.get(&offset) {
                tracing::debug!(offset, "page cache hit");
                return Ok(page.clone());
            }
            inner.generation
        };

        let page = self.source.fetch_page(offset, limit).await?;

        let mut inner = self.lock();
        if inner.generation == generation {
            inner.pages.insert(offset, page.clone());
        } else {
            tracing::debug!(offset, "cache cleared mid-fetch, page not stored");
        }
        Ok(page)
    }

    /// Discards all entries.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.pages.clear();
        inner.generation += 1;
        tracing::debug!(generation = inner.generation, "page cache cleared");
    }
}
