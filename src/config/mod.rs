use crate::errors::{FeedPingError, FeedPingResult};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub chat_api_url: String,
    pub chat_api_token: String,
    pub state_path: String,
    pub feeds: Vec<String>,
    pub poll_interval_secs: u64,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedPingResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let chat_api_url = std::env::var("CHAT_API_URL")
            .map_err(|_| FeedPingError::MissingEnvVar("CHAT_API_URL".to_string()))?;

        let chat_api_token = std::env::var("CHAT_API_TOKEN")
            .map_err(|_| FeedPingError::MissingEnvVar("CHAT_API_TOKEN".to_string()))?;

        // Default state path is relative to executable directory
        let state_path = std::env::var("FEEDPING_STATE_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("feedping.json").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./feedping.json".to_string())
        });

        let feeds = match std::env::var("FEEDPING_FEEDS") {
            Ok(raw) => parse_feed_list(&raw)?,
            Err(_) => Vec::new(),
        };

        let poll_interval_secs = std::env::var("FEEDPING_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Ok(Self {
            chat_api_url,
            chat_api_token,
            state_path,
            feeds,
            poll_interval_secs,
        })
    }
}

/// Parse the comma-separated feed list, rejecting anything that is not a
/// syntactically valid URL.
fn parse_feed_list(raw: &str) -> FeedPingResult<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            url::Url::parse(s)
                .map(|_| s.to_string())
                .map_err(|e| FeedPingError::InvalidUrl(format!("{s}: {e}")))
        })
        .collect()
}
