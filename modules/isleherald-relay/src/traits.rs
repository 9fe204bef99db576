// Trait abstractions for the two platform collaborators.
//
// SearchApi — the search endpoint, one call per run. Typed errors so the
//   fetcher can map status/body onto the run-level taxonomy verbatim.
// ChatGateway — the chat platform session: connect resolves once the
//   platform confirms the bot identity (the readiness signal), destinations
//   returns explicit capability snapshots so eligibility stays a pure
//   function, send delivers one rendered message to one destination.
//
// These enable deterministic testing with MockSearchApi and MockGateway:
// no network, no tokens.

use anyhow::Result;
use async_trait::async_trait;

use discord_client::permissions::{
    compute_base_permissions, compute_channel_permissions, ATTACH_FILES, EMBED_LINKS,
    SEND_MESSAGES, VIEW_CHANNEL,
};
use discord_client::{CreateMessage, DiscordClient, Embed, EmbedImage};
use twitter_client::{RecentSearchResponse, TwitterClient, TwitterError};

use crate::render::{RenderedMessage, ACCENT_COLOR};

// ---------------------------------------------------------------------------
// SearchApi
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Run one recent-search query for the raw (unencoded) query string.
    async fn recent_search(
        &self,
        raw_query: &str,
    ) -> std::result::Result<RecentSearchResponse, TwitterError>;
}

#[async_trait]
impl SearchApi for TwitterClient {
    async fn recent_search(
        &self,
        raw_query: &str,
    ) -> std::result::Result<RecentSearchResponse, TwitterError> {
        self.search_recent(raw_query).await
    }
}

// ---------------------------------------------------------------------------
// ChatGateway
// ---------------------------------------------------------------------------

/// The session's own identity, confirmed by the platform at connect time.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub id: String,
    pub username: String,
}

/// Snapshot of the capabilities the session holds in one channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilitySet {
    pub view_channel: bool,
    pub send_messages: bool,
    pub embed_links: bool,
    pub attach_files: bool,
}

impl CapabilitySet {
    /// The three-capability test: read, send, and attach-media or embed-link.
    pub fn is_eligible(&self) -> bool {
        self.view_channel && self.send_messages && (self.embed_links || self.attach_files)
    }
}

/// A candidate chat-platform location, with the capability snapshot taken at
/// enumeration time. Recomputed fresh on every run.
#[derive(Debug, Clone)]
pub struct Destination {
    pub id: String,
    pub guild_name: String,
    pub channel_name: String,
    pub capabilities: CapabilitySet,
}

#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Resolves once the platform confirms the session is authorized and
    /// ready. Awaited at most once per session.
    async fn connect(&self) -> Result<BotIdentity>;

    /// Every channel of every guild the session belongs to, eligible or not.
    async fn destinations(&self, identity: &BotIdentity) -> Result<Vec<Destination>>;

    /// Deliver one rendered message to one destination.
    async fn send(&self, destination_id: &str, message: &RenderedMessage) -> Result<()>;

    /// Release the platform session. Safe to call in any state.
    async fn disconnect(&self);
}

// ---------------------------------------------------------------------------
// Discord implementation
// ---------------------------------------------------------------------------

pub struct DiscordGateway {
    client: DiscordClient,
}

impl DiscordGateway {
    pub fn new(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn connect(&self) -> Result<BotIdentity> {
        let user = self.client.current_user().await?;
        tracing::info!(id = %user.id, username = %user.username, "Bot identity confirmed");
        Ok(BotIdentity {
            id: user.id,
            username: user.username,
        })
    }

    async fn destinations(&self, identity: &BotIdentity) -> Result<Vec<Destination>> {
        let mut destinations = Vec::new();

        for guild in self.client.guilds().await? {
            let roles = self.client.guild_roles(&guild.id).await?;
            let member = self.client.current_member(&guild.id).await?;
            let base = compute_base_permissions(&guild.id, &member.roles, &roles);

            for channel in self.client.guild_channels(&guild.id).await? {
                if !channel.is_text() {
                    continue;
                }
                let perms = compute_channel_permissions(
                    base,
                    &guild.id,
                    &identity.id,
                    &member.roles,
                    &channel.permission_overwrites,
                );
                destinations.push(Destination {
                    id: channel.id,
                    guild_name: guild.name.clone(),
                    channel_name: channel.name,
                    capabilities: CapabilitySet {
                        view_channel: perms & VIEW_CHANNEL != 0,
                        send_messages: perms & SEND_MESSAGES != 0,
                        embed_links: perms & EMBED_LINKS != 0,
                        attach_files: perms & ATTACH_FILES != 0,
                    },
                });
            }
        }

        Ok(destinations)
    }

    async fn send(&self, destination_id: &str, message: &RenderedMessage) -> Result<()> {
        let embeds: Vec<Embed> = message
            .units
            .iter()
            .map(|unit| Embed {
                title: unit.title.clone(),
                description: unit.body.clone(),
                url: Some(unit.link.clone()),
                color: Some(ACCENT_COLOR),
                image: unit.image_url.clone().map(|url| EmbedImage { url }),
            })
            .collect();

        self.client
            .create_message(
                destination_id,
                CreateMessage {
                    content: None,
                    embeds,
                },
            )
            .await?;
        Ok(())
    }

    async fn disconnect(&self) {
        // REST sessions hold no server-side state to release.
        tracing::debug!("Discord session released");
    }
}
