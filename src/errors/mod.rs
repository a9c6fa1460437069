use thiserror::Error;

/// Crate-wide error type. The `parse url`/`parse feed`/`* state` message
/// prefixes are a stable contract: operators grep logs on them, and tests
/// match on them.
#[derive(Error, Debug)]
pub enum FeedPingError {
    // Configuration errors
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    // Fetch errors
    #[error("parse url: http error: {0}")]
    FeedStatus(String),

    #[error("parse url: {0}")]
    FeedTransport(#[source] reqwest::Error),

    #[error("parse feed: {0}")]
    FeedParse(String),

    // State store errors
    #[error("read state: {0}")]
    StateRead(#[source] std::io::Error),

    #[error("decode state: {0}")]
    StateDecode(String),

    #[error("encode state: {0}")]
    StateEncode(String),

    #[error("write state: {0}")]
    StateWrite(#[source] std::io::Error),

    // Delivery errors from the chatapi library
    #[error("send notification: {0}")]
    Delivery(#[from] chatapi::ChatError),
}

pub type FeedPingResult<T> = Result<T, FeedPingError>;
