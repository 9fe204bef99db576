// Test mocks for the two trait boundaries:
// - MockSearchApi (SearchApi) — canned envelope or error, records the last
//   raw query so tests can assert on query construction.
// - MockGateway (ChatGateway) — canned destination list, per-destination
//   send failure injection, connect failure/hang modes, call counters.
//
// Plus helpers for constructing destinations and capability sets.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use twitter_client::{RecentSearchResponse, TwitterError};

use crate::render::RenderedMessage;
use crate::traits::{BotIdentity, CapabilitySet, ChatGateway, Destination, SearchApi};

// ---------------------------------------------------------------------------
// MockSearchApi
// ---------------------------------------------------------------------------

pub struct MockSearchApi {
    response: RecentSearchResponse,
    failure: Option<(u16, String)>,
    decode_failure: Option<String>,
    last_query: Mutex<Option<String>>,
}

impl MockSearchApi {
    pub fn returning(response: RecentSearchResponse) -> Self {
        Self {
            response,
            failure: None,
            decode_failure: None,
            last_query: Mutex::new(None),
        }
    }

    /// Parse a raw JSON envelope, as the API would return it.
    pub fn returning_json(json: &str) -> Self {
        Self::returning(serde_json::from_str(json).expect("invalid test JSON"))
    }

    pub fn failing(status: u16, body: &str) -> Self {
        let mut mock = Self::returning(RecentSearchResponse::default());
        mock.failure = Some((status, body.to_string()));
        mock
    }

    /// The response body does not parse into the expected schema.
    pub fn failing_decode(message: &str) -> Self {
        let mut mock = Self::returning(RecentSearchResponse::default());
        mock.decode_failure = Some(message.to_string());
        mock
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn recent_search(
        &self,
        raw_query: &str,
    ) -> std::result::Result<RecentSearchResponse, TwitterError> {
        *self.last_query.lock().unwrap() = Some(raw_query.to_string());

        if let Some((status, body)) = &self.failure {
            return Err(TwitterError::Api {
                status: *status,
                body: body.clone(),
            });
        }
        if let Some(message) = &self.decode_failure {
            return Err(TwitterError::Decode(message.clone()));
        }
        Ok(self.response.clone())
    }
}

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

pub struct MockGateway {
    destinations: Vec<Destination>,
    failing_sends: HashSet<String>,
    connect_fails: bool,
    connect_hangs: bool,
    destinations_fail: bool,
    sent: Mutex<Vec<(String, RenderedMessage)>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            destinations: Vec::new(),
            failing_sends: HashSet::new(),
            connect_fails: false,
            connect_hangs: false,
            destinations_fail: false,
            sent: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
        }
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Sends to this destination id fail with a network error.
    pub fn fail_send(mut self, destination_id: &str) -> Self {
        self.failing_sends.insert(destination_id.to_string());
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.connect_fails = true;
        self
    }

    /// The readiness signal never arrives; connect must time out.
    pub fn hanging_connect(mut self) -> Self {
        self.connect_hangs = true;
        self
    }

    /// Destination enumeration fails even though the session is ready.
    pub fn failing_destinations(mut self) -> Self {
        self.destinations_fail = true;
        self
    }

    pub fn sent(&self) -> Vec<(String, RenderedMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn connect(&self) -> Result<BotIdentity> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        if self.connect_hangs {
            futures::future::pending::<()>().await;
        }
        if self.connect_fails {
            bail!("MockGateway: login rejected");
        }
        Ok(BotIdentity {
            id: "bot-user".to_string(),
            username: "isleherald".to_string(),
        })
    }

    async fn destinations(&self, _identity: &BotIdentity) -> Result<Vec<Destination>> {
        if self.destinations_fail {
            bail!("MockGateway: guild listing unavailable");
        }
        Ok(self.destinations.clone())
    }

    async fn send(&self, destination_id: &str, message: &RenderedMessage) -> Result<()> {
        if self.failing_sends.contains(destination_id) {
            bail!("MockGateway: network error sending to {destination_id}");
        }
        self.sent
            .lock()
            .unwrap()
            .push((destination_id.to_string(), message.clone()));
        Ok(())
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn full_caps() -> CapabilitySet {
    CapabilitySet {
        view_channel: true,
        send_messages: true,
        embed_links: true,
        attach_files: true,
    }
}

pub fn destination(id: &str, capabilities: CapabilitySet) -> Destination {
    Destination {
        id: id.to_string(),
        guild_name: "test-guild".to_string(),
        channel_name: format!("channel-{id}"),
        capabilities,
    }
}
