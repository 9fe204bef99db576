pub mod error;
pub mod permissions;
pub mod types;

pub use error::{DiscordError, Result};
pub use types::{
    Channel, CreateMessage, CurrentUser, Embed, EmbedImage, GuildMember, PartialGuild,
    PermissionOverwrite, Role, MAX_EMBEDS_PER_MESSAGE,
};

use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://discord.com/api/v10";

pub struct DiscordClient {
    client: reqwest::Client,
    token: String,
}

impl DiscordClient {
    /// Takes an injected reqwest client so callers (and tests) control
    /// connection reuse.
    pub fn new(client: reqwest::Client, token: String) -> Self {
        Self { client, token }
    }

    /// The bot's own identity. A success here doubles as token validation.
    pub async fn current_user(&self) -> Result<CurrentUser> {
        self.get_json("/users/@me").await
    }

    /// Guilds the bot belongs to.
    pub async fn guilds(&self) -> Result<Vec<PartialGuild>> {
        self.get_json("/users/@me/guilds").await
    }

    pub async fn guild_roles(&self, guild_id: &str) -> Result<Vec<Role>> {
        self.get_json(&format!("/guilds/{guild_id}/roles")).await
    }

    /// The bot's own membership in a guild (role list).
    pub async fn current_member(&self, guild_id: &str) -> Result<GuildMember> {
        self.get_json(&format!("/users/@me/guilds/{guild_id}/member"))
            .await
    }

    pub async fn guild_channels(&self, guild_id: &str) -> Result<Vec<Channel>> {
        self.get_json(&format!("/guilds/{guild_id}/channels")).await
    }

    /// Post one message to a channel, truncating to the embed ceiling.
    pub async fn create_message(&self, channel_id: &str, message: CreateMessage) -> Result<()> {
        if message.embeds.len() > MAX_EMBEDS_PER_MESSAGE {
            tracing::warn!(
                channel_id,
                dropped = message.embeds.len() - MAX_EMBEDS_PER_MESSAGE,
                "Truncating embeds to the per-message ceiling"
            );
        }
        let message = message.truncated();

        let url = format!("{BASE_URL}/channels/{channel_id}/messages");
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .json(&message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{BASE_URL}{path}");
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let value: T = serde_json::from_str(&body)?;
        Ok(value)
    }
}
