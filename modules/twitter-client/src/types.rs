use serde::Deserialize;

/// Success envelope of `GET /2/tweets/search/recent`. Both halves are
/// optional on the wire: `data` is omitted entirely when nothing matched,
/// and `includes` is omitted when no expansion resolved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentSearchResponse {
    pub data: Option<Vec<Tweet>>,
    pub includes: Option<Includes>,
}

impl RecentSearchResponse {
    /// Posts in the order the API returned them.
    pub fn tweets(&self) -> &[Tweet] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Resolve a media key to its URL, if the expansion carried one.
    /// Unresolved keys are "no media", never an error.
    pub fn media_url(&self, media_key: &str) -> Option<&str> {
        self.includes
            .as_ref()?
            .media
            .as_ref()?
            .iter()
            .find(|m| m.media_key == media_key)?
            .url
            .as_deref()
    }
}

/// A single tweet from the search envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub attachments: Option<Attachments>,
}

impl Tweet {
    pub fn media_keys(&self) -> &[String] {
        self.attachments
            .as_ref()
            .and_then(|a| a.media_keys.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachments {
    pub media_keys: Option<Vec<String>>,
}

/// Expanded objects requested via `expansions=attachments.media_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct Includes {
    pub media: Option<Vec<Media>>,
}

/// A resolved media object. `url` can be absent (e.g. for videos, where the
/// API returns a preview field this client does not request).
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub media_key: String,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_url_resolves_known_keys_only() {
        let response: RecentSearchResponse = serde_json::from_str(
            r#"{
            "data": [{"id": "1", "text": "t", "attachments": {"media_keys": ["3_a", "3_b"]}}],
            "includes": {"media": [{"media_key": "3_a", "url": "http://a/1.jpg"}]}
        }"#,
        )
        .unwrap();

        assert_eq!(response.media_url("3_a"), Some("http://a/1.jpg"));
        assert_eq!(response.media_url("3_b"), None);
    }

    #[test]
    fn malformed_envelope_becomes_a_decode_error() {
        use crate::error::TwitterError;

        let err = serde_json::from_str::<RecentSearchResponse>(r#"{"data": "not-an-array"}"#)
            .map_err(TwitterError::from)
            .unwrap_err();

        match err {
            TwitterError::Decode(msg) => assert!(msg.contains("invalid type")),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn empty_envelope_has_no_tweets() {
        let response: RecentSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.tweets().is_empty());
        assert_eq!(response.media_url("3_a"), None);
    }
}
