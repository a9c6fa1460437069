use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Representation of application state, persisted as one JSON document.
///
/// `subscribers` is semantically a set, kept as a sorted list so the
/// serialized form is stable across runs. `watermarks` maps a feed URL to
/// the publication time of the newest entry already processed for it;
/// absent keys mean the feed has never been seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub subscribers: Vec<i64>,
    #[serde(default)]
    pub watermarks: BTreeMap<String, DateTime<Utc>>,
}
