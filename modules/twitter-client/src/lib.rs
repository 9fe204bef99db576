pub mod error;
pub mod types;

pub use error::{Result, TwitterError};
pub use types::{Attachments, Includes, Media, RecentSearchResponse, Tweet};

use chrono::DateTime;
use url::Url;

const SEARCH_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/recent";

/// Result cap per request. No pagination: one page per run.
const MAX_RESULTS: u32 = 100;

pub struct TwitterClient {
    client: reqwest::Client,
    token: String,
}

impl TwitterClient {
    /// Takes an injected reqwest client so callers (and tests) control
    /// connection reuse.
    pub fn new(client: reqwest::Client, token: String) -> Self {
        Self { client, token }
    }

    /// Run one recent-search query. `raw_query` is the unencoded search
    /// string (e.g. `from:someone has:images Week`); encoding happens here.
    pub async fn search_recent(&self, raw_query: &str) -> Result<RecentSearchResponse> {
        let url = search_url(raw_query);
        tracing::debug!(%url, "Querying recent search");

        let resp = self.client.get(url).bearer_auth(&self.token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            log_rate_limit_headers(resp.headers());
            let body = resp.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let envelope: RecentSearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = envelope.tweets().len(), "Recent search returned");
        Ok(envelope)
    }
}

/// Build the full request URL with percent-encoded query and the fixed
/// expansion parameters.
pub fn search_url(raw_query: &str) -> Url {
    let mut url = Url::parse(SEARCH_ENDPOINT).expect("static endpoint URL is valid");
    url.query_pairs_mut()
        .append_pair("query", raw_query)
        .append_pair("max_results", &MAX_RESULTS.to_string())
        .append_pair("expansions", "attachments.media_keys")
        .append_pair("media.fields", "url");
    url
}

/// Rate-limit headers are diagnostic only; they never change behavior.
fn log_rate_limit_headers(headers: &reqwest::header::HeaderMap) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("<missing>")
            .to_string()
    };

    let limit = header("x-rate-limit-limit");
    let remaining = header("x-rate-limit-remaining");
    let reset = header("x-rate-limit-reset");

    let reset_at = reset
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::warn!(%limit, %remaining, %reset_at, "Search API rate-limit state");
}
