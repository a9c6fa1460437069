use tracing::warn;

use crate::domain::Entry;
use crate::errors::FeedPingResult;
use crate::services::filter::select_new;
use crate::sources::traits::FeedSource;
use crate::storage::traits::StateStore;

/// Drives the fetch-filter-commit cycle per feed.
///
/// The store lock is never held across the fetch, and each feed only ever
/// touches its own watermark key, so independent feeds can be synced from
/// concurrent callers without interfering.
pub struct SyncService<S: StateStore, F: FeedSource> {
    store: S,
    source: F,
}

impl<S: StateStore, F: FeedSource> SyncService<S, F> {
    pub fn new(store: S, source: F) -> Self {
        Self { store, source }
    }

    /// Fetch one feed and return its entries published after the stored
    /// watermark, oldest first.
    ///
    /// The advanced watermark is committed before returning, so detection is
    /// at-least-once from the caller's point of view: a delivery failure
    /// after this call will not resurface the same entries.
    pub fn sync(&self, feed_url: &str) -> FeedPingResult<Vec<Entry>> {
        let fetched = self.source.fetch_entries(feed_url)?;
        let since = self.store.watermark(feed_url);

        let (fresh, next) = select_new(fetched, since);
        if next > since {
            self.store.set_watermark(feed_url, next)?;
        }

        Ok(fresh)
    }

    /// Run [`sync`](Self::sync) over every feed, logging and skipping the
    /// ones that fail so one broken feed cannot block the rest of the cycle.
    /// Feeds with no new entries are omitted from the result.
    pub fn sync_all(&self, feeds: &[String]) -> Vec<(String, Vec<Entry>)> {
        let mut results = Vec::new();

        for feed in feeds {
            match self.sync(feed) {
                Ok(entries) if !entries.is_empty() => results.push((feed.clone(), entries)),
                Ok(_) => {}
                Err(e) => warn!(feed = %feed, error = %e, "feed sync failed"),
            }
        }

        results
    }
}
