use thiserror::Error;

/// Run-level error taxonomy. `Transport`, `Decode`, and `Connect` are fatal
/// to a run and propagate to the caller unmodified; per-destination send
/// failures never appear here — they live in the `DeliveryReport`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("search API request failed (status {status}): {body}")]
    Transport { status: u16, body: String },

    #[error("search API network error: {0}")]
    Network(String),

    #[error("could not decode search response: {0}")]
    Decode(String),

    #[error("chat session connect failed: {0}")]
    Connect(String),

    /// A platform request failed after the session was ready (e.g. while
    /// enumerating destinations). Distinct from `Connect`: authorization
    /// already succeeded.
    #[error("chat platform request failed: {0}")]
    Gateway(String),

    #[error("delivery attempted before the session was ready")]
    NotConnected,

    #[error("configuration error: {0}")]
    Config(String),
}
