//! The composed run: fetch, then deliver if anything matched.

use isleherald_common::{DeliveryReport, RelayError};

use crate::dispatcher::Dispatcher;
use crate::fetcher::Fetcher;
use crate::traits::{ChatGateway, SearchApi};

pub struct Relay<S, G> {
    fetcher: Fetcher<S>,
    dispatcher: Dispatcher<G>,
}

impl<S: SearchApi, G: ChatGateway> Relay<S, G> {
    pub fn new(fetcher: Fetcher<S>, dispatcher: Dispatcher<G>) -> Self {
        Self {
            fetcher,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<G> {
        &self.dispatcher
    }

    /// One run end to end. The chat platform is never touched when nothing
    /// matched; when it is touched, the session is released on every exit
    /// path.
    pub async fn run(
        &mut self,
        author_id: &str,
        keywords: &[String],
    ) -> Result<DeliveryReport, RelayError> {
        let matched = self.fetcher.fetch(author_id, keywords).await?;

        if matched.is_empty() {
            tracing::info!("No matching post; skipping delivery");
            return Ok(DeliveryReport::empty_result());
        }

        if let Err(err) = self.dispatcher.connect().await {
            self.dispatcher.disconnect().await;
            return Err(err);
        }

        let outcome = self.dispatcher.deliver(&matched).await;
        self.dispatcher.disconnect().await;
        outcome
    }
}
