use chatapi::ChatClient;

use crate::config::Config;
use crate::domain::Entry;
use crate::errors::FeedPingResult;

/// Outbound delivery seam. The sync core never calls this directly; the
/// driver composes filter output with it.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn deliver(&self, chat_id: i64, entry: &Entry) -> FeedPingResult<()>;
}

pub struct NotificationService {
    client: ChatClient,
}

impl NotificationService {
    pub fn new(config: &Config) -> FeedPingResult<Self> {
        let client = ChatClient::new(&config.chat_api_url, &config.chat_api_token)?;
        Ok(Self { client })
    }
}

impl Notifier for NotificationService {
    fn deliver(&self, chat_id: i64, entry: &Entry) -> FeedPingResult<()> {
        match &entry.image {
            Some(image) => self.client.send_photo(chat_id, &entry.title, image)?,
            None => self.client.send_message(chat_id, &entry.title)?,
        };

        Ok(())
    }
}
