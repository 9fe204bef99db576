//! Session lifecycle and delivery fan-out.
//!
//! State machine: Disconnected -> Connecting -> Ready -> Disconnected.
//! `connect` is a one-shot transition bounded by a timeout; `deliver` is only
//! valid in Ready; `disconnect` is valid from any state and always ends
//! Disconnected.

use std::time::Duration;

use futures::future::join_all;
use isleherald_common::{DeliveryReport, DeliveryStatus, MatchResult, RelayError};

use crate::render::render;
use crate::traits::{BotIdentity, ChatGateway, Destination};

enum SessionState {
    Disconnected,
    Connecting,
    Ready(BotIdentity),
}

pub struct Dispatcher<G> {
    gateway: G,
    connect_timeout: Duration,
    state: SessionState,
}

impl<G: ChatGateway> Dispatcher<G> {
    pub fn new(gateway: G, connect_timeout: Duration) -> Self {
        Self {
            gateway,
            connect_timeout,
            state: SessionState::Disconnected,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Await the platform's readiness signal, bounded by the configured
    /// timeout. On failure the caller still owns the teardown: `disconnect`
    /// must run to release whatever was acquired.
    pub async fn connect(&mut self) -> Result<(), RelayError> {
        if !matches!(self.state, SessionState::Disconnected) {
            return Err(RelayError::Connect(
                "session already started; connect is one-shot".to_string(),
            ));
        }
        self.state = SessionState::Connecting;

        match tokio::time::timeout(self.connect_timeout, self.gateway.connect()).await {
            Ok(Ok(identity)) => {
                tracing::info!(username = %identity.username, "Session ready");
                self.state = SessionState::Ready(identity);
                Ok(())
            }
            Ok(Err(err)) => Err(RelayError::Connect(err.to_string())),
            Err(_) => Err(RelayError::Connect(format!(
                "readiness signal not received within {:?}",
                self.connect_timeout
            ))),
        }
    }

    /// Deliver one match to every eligible destination. Per-destination
    /// failures land in the report, never abort the remaining sends, and
    /// never escalate to a run-level error.
    pub async fn deliver(&self, result: &MatchResult) -> Result<DeliveryReport, RelayError> {
        let SessionState::Ready(identity) = &self.state else {
            return Err(RelayError::NotConnected);
        };

        if result.is_empty() {
            tracing::debug!("Empty match result; nothing to deliver");
            return Ok(DeliveryReport::empty_result());
        }

        let destinations = self
            .gateway
            .destinations(identity)
            .await
            .map_err(|err| RelayError::Gateway(format!("could not enumerate destinations: {err}")))?;

        // Permissions boundary, not an error: ineligible channels are
        // excluded silently.
        let eligible: Vec<&Destination> = destinations
            .iter()
            .filter(|d| d.capabilities.is_eligible())
            .collect();

        if eligible.is_empty() {
            tracing::warn!(
                enumerated = destinations.len(),
                "No eligible destinations; the bot lacks send/attach/read everywhere"
            );
            return Ok(DeliveryReport::no_destinations());
        }

        let message = render(result);
        tracing::info!(
            destinations = eligible.len(),
            units = message.units.len(),
            "Delivering"
        );

        let sends = eligible.iter().map(|destination| {
            let message = &message;
            async move {
                let outcome = self.gateway.send(&destination.id, message).await;
                (destination, outcome)
            }
        });

        let mut report = DeliveryReport {
            status: DeliveryStatus::Attempted,
            attempted: eligible.len(),
            succeeded: Default::default(),
            failed: Default::default(),
        };

        for (destination, outcome) in join_all(sends).await {
            match outcome {
                Ok(()) => {
                    tracing::info!(
                        guild = %destination.guild_name,
                        channel = %destination.channel_name,
                        "Sent"
                    );
                    report.succeeded.insert(destination.id.clone());
                }
                Err(err) => {
                    tracing::warn!(
                        guild = %destination.guild_name,
                        channel = %destination.channel_name,
                        error = %err,
                        "Send failed; continuing with remaining destinations"
                    );
                    report.failed.insert(destination.id.clone(), err.to_string());
                }
            }
        }

        Ok(report)
    }

    /// Valid from any state; always ends Disconnected. Safe to call after a
    /// failed or timed-out connect.
    pub async fn disconnect(&mut self) {
        self.gateway.disconnect().await;
        self.state = SessionState::Disconnected;
    }
}
