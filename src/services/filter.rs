use chrono::{DateTime, Utc};

use crate::domain::Entry;

/// Split fetched entries into the ones published strictly after `watermark`,
/// oldest first, and compute the watermark the caller should commit next.
///
/// The next watermark is the maximum publication time over ALL fetched
/// entries, floored at the current watermark. Taking the maximum rather
/// than the last fetched entry means a feed that reorders entries or
/// transiently shrinks can never move the watermark backward. An entry
/// published exactly at the watermark counts as already delivered.
pub fn select_new(entries: Vec<Entry>, watermark: DateTime<Utc>) -> (Vec<Entry>, DateTime<Utc>) {
    let next = entries
        .iter()
        .map(|entry| entry.published)
        .fold(watermark, |acc, published| acc.max(published));

    let mut fresh: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| entry.published > watermark)
        .collect();
    fresh.sort_by_key(|entry| entry.published);

    (fresh, next)
}
