//! Chat service bindings for Rust
//! Provides a small client to push text and photo messages to individual
//! chats addressed by their numeric id

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("chat not found: {0}")]
    ChatNotFound(i64),
    #[error("invalid header value")]
    InvalidHeader,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(alias = "chatId")]
    pub chat_id: i64,
    pub content: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
}

pub struct ChatClient {
    url: String,
    client: Client,
}

impl ChatClient {
    pub fn new(url: &str, token: &str) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(token).map_err(|_| ChatError::InvalidHeader)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn post(&self, chat_id: i64, payload: &SendMessagePayload<'_>) -> Result<Message, ChatError> {
        let response = self
            .client
            .post(format!("{}/chats/{}/messages", self.url, chat_id))
            .json(payload)
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ChatError::ChatNotFound(chat_id));
        }

        let response = response.error_for_status()?;
        Ok(response.json()?)
    }

    /// Send a plain text message to a chat.
    pub fn send_message(&self, chat_id: i64, content: &str) -> Result<Message, ChatError> {
        self.post(
            chat_id,
            &SendMessagePayload {
                content,
                photo_url: None,
            },
        )
    }

    /// Send a message with an attached photo URL.
    pub fn send_photo(
        &self,
        chat_id: i64,
        content: &str,
        photo_url: &str,
    ) -> Result<Message, ChatError> {
        self.post(
            chat_id,
            &SendMessagePayload {
                content,
                photo_url: Some(photo_url),
            },
        )
    }
}

/// Create a new chat client.
pub fn create_client(url: &str, token: &str) -> Result<ChatClient, ChatError> {
    ChatClient::new(url, token)
}

/// Send a plain text message to a chat.
pub fn send_message(
    url: &str,
    token: &str,
    chat_id: i64,
    content: &str,
) -> Result<Message, ChatError> {
    create_client(url, token)?.send_message(chat_id, content)
}
