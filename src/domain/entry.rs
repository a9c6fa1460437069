use chrono::{DateTime, Utc};

/// One item within a feed, as normalized by the fetcher.
///
/// Entries are never persisted; they only exist between a fetch and the
/// watermark comparison. Entries whose document carries no parsable
/// timestamp get [`DateTime::UNIX_EPOCH`] and are therefore never newer
/// than any recorded watermark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub image: Option<String>,
    pub published: DateTime<Utc>,
}

impl Entry {
    pub fn new(title: String, published: DateTime<Utc>) -> Self {
        Self {
            title,
            image: None,
            published,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}
