use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscordError>;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for DiscordError {
    fn from(err: reqwest::Error) -> Self {
        DiscordError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for DiscordError {
    fn from(err: serde_json::Error) -> Self {
        DiscordError::Decode(err.to_string())
    }
}
