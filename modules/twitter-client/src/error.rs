use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwitterError>;

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `body` is the raw response text, preserved verbatim
    /// for diagnostics.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        TwitterError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TwitterError {
    fn from(err: serde_json::Error) -> Self {
        TwitterError::Decode(err.to_string())
    }
}
