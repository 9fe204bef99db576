use crate::error::RelayError;

/// Application configuration loaded from environment variables. Credential
/// checks run before any network activity so a missing token is reported to
/// the caller, never discovered mid-run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the X API v2 recent-search endpoint.
    pub twitter_token: String,
    /// Bot token for the Discord REST API.
    pub discord_token: String,
    /// The author identity to search under (`from:` operator).
    pub twitter_id: String,
    /// Required keywords, all of which must appear in a post's text.
    /// An empty list is valid and yields a guaranteed empty result.
    pub keywords: Vec<String>,
    /// Bound on the chat session readiness wait, in seconds.
    pub connect_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let config = Self {
            twitter_token: required_env("TWITTER_TOKEN")?,
            discord_token: required_env("DISCORD_TOKEN")?,
            twitter_id: required_env("TWITTER_ID")?,
            keywords: std::env::var("KEYWORDS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            connect_timeout_secs: std::env::var("CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    RelayError::Config("CONNECT_TIMEOUT_SECS must be a number".to_string())
                })?,
        };

        Ok(config)
    }

    pub fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  TWITTER_TOKEN: {}", preview(&self.twitter_token));
        tracing::info!("  DISCORD_TOKEN: {}", preview(&self.discord_token));
        tracing::info!("  TWITTER_ID: {}", self.twitter_id);
        tracing::info!("  KEYWORDS: {:?}", self.keywords);
        tracing::info!("  CONNECT_TIMEOUT_SECS: {}", self.connect_timeout_secs);
    }
}

fn required_env(key: &str) -> Result<String, RelayError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::Config(format!("{key} environment variable is required")))
}
