//! Rendering: one `MatchResult` → the platform-neutral message units the
//! gateway turns into embeds. `units.len() == max(1, media_urls.len())`.

use isleherald_common::MatchResult;

/// Title carried by the first unit.
pub const MESSAGE_TITLE: &str = "This week's island workshop schedule";

/// Fixed fallback when no canonical link can be formed (empty post id).
pub const PLACEHOLDER_LINK: &str = "https://twitter.com";

/// Accent color on every unit (the platform's brand blue).
pub const ACCENT_COLOR: u32 = 0x1DA1F2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUnit {
    pub title: Option<String>,
    pub body: Option<String>,
    pub link: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub units: Vec<MessageUnit>,
}

/// The public URL of the matched post. An empty id would otherwise produce a
/// malformed `.../status/` link, so it falls back to the fixed placeholder.
pub fn canonical_link(author_id: &str, id: &str) -> String {
    if id.is_empty() {
        return PLACEHOLDER_LINK.to_string();
    }
    format!("https://twitter.com/{author_id}/status/{id}")
}

/// Pure and deterministic: the same `MatchResult` always renders to
/// structurally identical units.
pub fn render(result: &MatchResult) -> RenderedMessage {
    let link = canonical_link(&result.author_id, &result.id);

    let mut units = vec![MessageUnit {
        title: Some(MESSAGE_TITLE.to_string()),
        body: Some(result.text.clone()),
        link: link.clone(),
        image_url: result.media_urls.first().cloned(),
    }];

    for url in result.media_urls.iter().skip(1) {
        units.push(MessageUnit {
            title: None,
            body: None,
            link: link.clone(),
            image_url: Some(url.clone()),
        });
    }

    RenderedMessage { units }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(id: &str, media_urls: &[&str]) -> MatchResult {
        MatchResult {
            id: id.to_string(),
            text: "Weekly #island update".to_string(),
            author_id: "TestUser".to_string(),
            media_urls: media_urls.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn three_media_urls_render_to_three_units() {
        let result = matched("12345", &["http://a/1.jpg", "http://a/2.jpg", "http://a/3.jpg"]);
        let message = render(&result);

        assert_eq!(message.units.len(), 3);

        let first = &message.units[0];
        assert_eq!(first.title.as_deref(), Some(MESSAGE_TITLE));
        assert_eq!(first.body.as_deref(), Some("Weekly #island update"));
        assert_eq!(first.link, "https://twitter.com/TestUser/status/12345");
        assert_eq!(first.image_url.as_deref(), Some("http://a/1.jpg"));

        for (unit, url) in message.units[1..].iter().zip(["http://a/2.jpg", "http://a/3.jpg"]) {
            assert_eq!(unit.title, None);
            assert_eq!(unit.body, None);
            assert_eq!(unit.link, first.link);
            assert_eq!(unit.image_url.as_deref(), Some(url));
        }
    }

    #[test]
    fn no_media_renders_a_single_unit_without_image() {
        let message = render(&matched("54321", &[]));

        assert_eq!(message.units.len(), 1);
        assert_eq!(message.units[0].image_url, None);
        assert_eq!(
            message.units[0].link,
            "https://twitter.com/TestUser/status/54321"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let result = matched("1", &["http://a/1.jpg", "http://a/2.jpg"]);
        assert_eq!(render(&result), render(&result));
    }

    #[test]
    fn empty_id_falls_back_to_the_placeholder_link() {
        let message = render(&matched("", &[]));

        assert_eq!(message.units[0].link, PLACEHOLDER_LINK);
        assert!(!message.units[0].link.ends_with("/status/"));
    }
}
