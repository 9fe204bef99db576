//! Query construction and the matching policy: one API response in, at most
//! one canonical `MatchResult` out.

use isleherald_common::{MatchResult, RelayError};
use twitter_client::TwitterError;

use crate::traits::SearchApi;

pub struct Fetcher<S> {
    api: S,
}

impl<S: SearchApi> Fetcher<S> {
    pub fn new(api: S) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &S {
        &self.api
    }

    /// Query the search endpoint and select the first post whose text
    /// contains every keyword. The request is issued regardless of keyword
    /// count; with zero keywords the result is always `Empty` — matching
    /// everything would flood every channel on every run.
    pub async fn fetch(
        &self,
        author_id: &str,
        keywords: &[String],
    ) -> Result<MatchResult, RelayError> {
        let query = build_query(author_id, keywords);
        tracing::info!(%query, "Fetching recent posts");

        let envelope = self
            .api
            .recent_search(&query)
            .await
            .map_err(map_search_error)?;

        if keywords.is_empty() {
            tracing::info!("No keywords configured; forcing an empty result");
            return Ok(MatchResult::empty());
        }

        for tweet in envelope.tweets() {
            if !matches_keywords(&tweet.text, keywords) {
                continue;
            }

            // Post key order preserved; unresolved keys are dropped silently.
            let media_urls: Vec<String> = tweet
                .media_keys()
                .iter()
                .filter_map(|key| envelope.media_url(key))
                .map(String::from)
                .collect();

            tracing::info!(
                id = %tweet.id,
                media = media_urls.len(),
                "Matched a post"
            );
            return Ok(MatchResult {
                id: tweet.id.clone(),
                text: tweet.text.clone(),
                author_id: author_id.to_string(),
                media_urls,
            });
        }

        tracing::info!(scanned = envelope.tweets().len(), "No post matched");
        Ok(MatchResult::empty())
    }
}

/// `from:<authorId> has:images <kw1> <kw2> ...` — keywords space-joined,
/// order-preserving, no dedup. Identical shape for zero keywords.
pub fn build_query(author_id: &str, keywords: &[String]) -> String {
    let mut query = format!("from:{author_id} has:images");
    for keyword in keywords {
        query.push(' ');
        query.push_str(keyword);
    }
    query
}

/// Case-insensitive, unanchored substring containment per keyword ("week"
/// matches inside "weekly"). An empty keyword list never matches.
pub fn matches_keywords(text: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .all(|keyword| haystack.contains(&keyword.to_lowercase()))
}

fn map_search_error(err: TwitterError) -> RelayError {
    match err {
        TwitterError::Api { status, body } => RelayError::Transport { status, body },
        TwitterError::Decode(msg) => RelayError::Decode(msg),
        TwitterError::Network(msg) => RelayError::Network(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keeps_keyword_order_and_duplicates() {
        let keywords = vec!["Week".to_string(), "#island".to_string(), "Week".to_string()];
        assert_eq!(
            build_query("TestUser123", &keywords),
            "from:TestUser123 has:images Week #island Week"
        );
    }

    #[test]
    fn query_shape_is_identical_for_zero_keywords() {
        assert_eq!(build_query("TestUser123", &[]), "from:TestUser123 has:images");
    }

    #[test]
    fn predicate_is_case_insensitive_substring() {
        let keywords = vec!["week".to_string(), "#island".to_string()];
        assert!(matches_keywords("Weekly #Island update", &keywords));
        assert!(!matches_keywords("Weekly update", &keywords));
    }

    #[test]
    fn empty_keyword_list_is_a_forced_non_match() {
        assert!(!matches_keywords("anything at all", &[]));
    }
}
