use std::collections::{BTreeMap, BTreeSet};

/// The fetcher's output: at most one matched post per run.
///
/// An empty `id` is the sole emptiness discriminator — `MatchResult::empty()`
/// is the value the matching policy returns when nothing qualified. A
/// non-empty result always carries a non-empty id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub id: String,
    pub text: String,
    /// The author identity the caller searched under. Carried through as
    /// supplied, not re-derived from the API response.
    pub author_id: String,
    /// Resolved media URLs in the post's own media-key order.
    pub media_urls: Vec<String>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            author_id: String::new(),
            media_urls: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// What kind of run this report describes. A run that matched nothing is
/// distinguishable from one that matched but had nowhere to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// No post matched (or no keywords were supplied); nothing was attempted.
    EmptyResult,
    /// A post matched but the session had zero eligible destinations.
    NoDestinations,
    /// Delivery was attempted against at least one destination.
    Attempted,
}

/// Per-run delivery outcome, aggregated deterministically by destination id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub status: DeliveryStatus,
    pub attempted: usize,
    pub succeeded: BTreeSet<String>,
    /// Destination id → send error message. Failures here never escalate to
    /// a run-level error.
    pub failed: BTreeMap<String, String>,
}

impl DeliveryReport {
    pub fn empty_result() -> Self {
        Self {
            status: DeliveryStatus::EmptyResult,
            attempted: 0,
            succeeded: BTreeSet::new(),
            failed: BTreeMap::new(),
        }
    }

    pub fn no_destinations() -> Self {
        Self {
            status: DeliveryStatus::NoDestinations,
            attempted: 0,
            succeeded: BTreeSet::new(),
            failed: BTreeMap::new(),
        }
    }
}
