use chrono::{DateTime, Utc};

use crate::errors::FeedPingResult;

/// Concurrency-safe access to the durable application state. All mutations
/// rewrite the whole backing record before returning.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    /// Snapshot of the subscriber list; mutating the returned vector does
    /// not affect the store.
    fn subscribers(&self) -> Vec<i64>;

    /// Replace the full subscriber list and durably commit the state.
    fn set_subscribers(&self, subscribers: Vec<i64>) -> FeedPingResult<()>;

    /// Last-seen entry time for the feed; the epoch when the feed is unknown.
    fn watermark(&self, feed: &str) -> DateTime<Utc>;

    /// Record the feed's watermark and durably commit the state.
    fn set_watermark(&self, feed: &str, at: DateTime<Utc>) -> FeedPingResult<()>;
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn subscribers(&self) -> Vec<i64> {
        (**self).subscribers()
    }

    fn set_subscribers(&self, subscribers: Vec<i64>) -> FeedPingResult<()> {
        (**self).set_subscribers(subscribers)
    }

    fn watermark(&self, feed: &str) -> DateTime<Utc> {
        (**self).watermark(feed)
    }

    fn set_watermark(&self, feed: &str, at: DateTime<Utc>) -> FeedPingResult<()> {
        (**self).set_watermark(feed, at)
    }
}
