use crate::errors::FeedPingResult;
use crate::storage::traits::StateStore;

/// Subscriber bookkeeping over the store.
///
/// The list is semantically a set: adds dedupe, and the persisted order is
/// kept sorted so the serialized state stays stable across runs.
pub struct SubscriberService<S: StateStore> {
    store: S,
}

impl<S: StateStore> SubscriberService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a chat to the subscriber set. Returns false when the chat was
    /// already subscribed.
    pub fn subscribe(&self, chat_id: i64) -> FeedPingResult<bool> {
        let mut subscribers = self.store.subscribers();
        if subscribers.contains(&chat_id) {
            return Ok(false);
        }

        subscribers.push(chat_id);
        subscribers.sort_unstable();
        self.store.set_subscribers(subscribers)?;
        Ok(true)
    }

    /// Remove a chat from the subscriber set. Returns false when the chat
    /// was not subscribed.
    pub fn unsubscribe(&self, chat_id: i64) -> FeedPingResult<bool> {
        let mut subscribers = self.store.subscribers();
        let before = subscribers.len();
        subscribers.retain(|&id| id != chat_id);
        if subscribers.len() == before {
            return Ok(false);
        }

        self.store.set_subscribers(subscribers)?;
        Ok(true)
    }

    pub fn list(&self) -> Vec<i64> {
        self.store.subscribers()
    }
}
