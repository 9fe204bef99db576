use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use discord_client::DiscordClient;
use isleherald_common::Config;
use isleherald_relay::dispatcher::Dispatcher;
use isleherald_relay::fetcher::Fetcher;
use isleherald_relay::relay::Relay;
use isleherald_relay::traits::DiscordGateway;
use twitter_client::TwitterClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("isleherald_relay=info".parse()?),
        )
        .init();

    info!("Isleherald relay starting...");

    // Load config before any network activity
    let config = Config::from_env()?;
    config.log_redacted();

    // One reusable HTTP client for both collaborators
    let http = reqwest::Client::new();

    let fetcher = Fetcher::new(TwitterClient::new(http.clone(), config.twitter_token.clone()));
    let gateway = DiscordGateway::new(DiscordClient::new(http, config.discord_token.clone()));
    let dispatcher = Dispatcher::new(gateway, Duration::from_secs(config.connect_timeout_secs));

    let mut relay = Relay::new(fetcher, dispatcher);
    let report = relay.run(&config.twitter_id, &config.keywords).await?;

    info!(
        status = ?report.status,
        attempted = report.attempted,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Run complete"
    );

    Ok(())
}
