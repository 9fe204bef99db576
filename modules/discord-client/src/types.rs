use serde::{Deserialize, Deserializer, Serialize};

/// `GET /users/@me` — the bot's own identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

/// `GET /users/@me/guilds` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PartialGuild {
    pub id: String,
    pub name: String,
}

/// A guild role. The API ships permission bitsets as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "u64_from_string")]
    pub permissions: u64,
}

/// `GET /users/@me/guilds/{guild_id}/member` — only the role list matters
/// for permission computation.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Channel type 0 is GUILD_TEXT; everything else (voice, category, thread,
/// forum) is not a message destination for this client.
pub const CHANNEL_TYPE_TEXT: u8 = 0;

/// `GET /guilds/{guild_id}/channels` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwrite>,
}

impl Channel {
    pub fn is_text(&self) -> bool {
        self.kind == CHANNEL_TYPE_TEXT
    }
}

/// Overwrite target kind: 0 targets a role, 1 targets a member.
pub const OVERWRITE_TYPE_ROLE: u8 = 0;
pub const OVERWRITE_TYPE_MEMBER: u8 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct PermissionOverwrite {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(deserialize_with = "u64_from_string")]
    pub allow: u64,
    #[serde(deserialize_with = "u64_from_string")]
    pub deny: u64,
}

/// Per-message embed ceiling documented by the platform. Excess embeds are
/// truncated, never split into extra messages.
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;

/// `POST /channels/{channel_id}/messages` payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl CreateMessage {
    /// Enforce the embed ceiling, keeping the leading embeds in order.
    pub fn truncated(mut self) -> Self {
        self.embeds.truncate(MAX_EMBEDS_PER_MESSAGE);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

fn u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<u64>().map_err(serde::de::Error::custom)
}
