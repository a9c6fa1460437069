use chrono::DateTime;
use feed_rs::parser;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::domain::Entry;
use crate::errors::{FeedPingError, FeedPingResult};
use crate::sources::traits::FeedSource;

/// Fetches RSS, Atom and JSON feeds over HTTP. feed-rs detects the document
/// format, so one source covers all three.
pub struct RssAtomSource {
    client: Client,
}

impl RssAtomSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn fetch_bytes(&self, url: &str) -> FeedPingResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(FeedPingError::FeedTransport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedPingError::FeedStatus(status.to_string()));
        }

        let bytes = response.bytes().map_err(FeedPingError::FeedTransport)?;
        Ok(bytes.to_vec())
    }

    fn entries_from_bytes(bytes: &[u8]) -> FeedPingResult<Vec<Entry>> {
        let parsed = parser::parse(bytes).map_err(|e| FeedPingError::FeedParse(e.to_string()))?;

        let entries = parsed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry.title.map(|t| t.content).unwrap_or_default();

                let published = entry
                    .published
                    .or(entry.updated)
                    .unwrap_or(DateTime::UNIX_EPOCH);

                let image = entry
                    .summary
                    .and_then(|summary| first_image_url(&summary.content));

                Entry::new(title, published).with_image(image)
            })
            .collect();

        Ok(entries)
    }
}

impl Default for RssAtomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSource for RssAtomSource {
    fn fetch_entries(&self, url: &str) -> FeedPingResult<Vec<Entry>> {
        let bytes = self.fetch_bytes(url)?;
        Self::entries_from_bytes(&bytes)
    }
}

/// First `img src` in an HTML fragment, if any. Feeds commonly embed the
/// entry image inside the summary markup rather than a media element.
fn first_image_url(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse("img").ok()?;

    fragment
        .select(&selector)
        .find_map(|img| img.value().attr("src"))
        .map(str::to_string)
}
