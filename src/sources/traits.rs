use crate::domain::Entry;
use crate::errors::FeedPingResult;

/// A way to retrieve the entries of one remotely hosted feed.
#[cfg_attr(test, mockall::automock)]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed document at `url` and normalize its entries.
    ///
    /// An empty list is a valid, non-error result. No retries happen here;
    /// errors are returned with their phase in the message, never logged or
    /// swallowed.
    fn fetch_entries(&self, url: &str) -> FeedPingResult<Vec<Entry>>;
}
