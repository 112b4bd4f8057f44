// web_app/client.rs - Page-side fetcher for the products route
//
// Calls GET /api/products?q=<json> and drives a SearchSession: one
// ticketed fetch per `refresh`, abandoned on any error or once the
// slow-load threshold passes. Stale outcomes are dropped by the session.
//
// `refresh` keeps the session borrowed until the outcome lands. A page
// that must keep dispatching actions while a fetch is in flight runs the
// three steps itself: `SearchSession::begin_fetch`, `load` (which holds
// no session borrow), then `SearchSession::complete`.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::web_app::error::SearchError;
use crate::web_app::model::{Product, SearchRequest};
use crate::web_app::session::{Completion, FetchOutcome, FetchTicket, SearchSession};

/// Default slow-load threshold before a fetch is abandoned
pub const DEFAULT_SLOW_LOAD: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
pub struct ProductsClient {
    http: Client,
    endpoint: Url,
    slow_load: Duration,
}

impl ProductsClient {
    /// `endpoint` is the full products route URL, e.g. `http://host/api/products`
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            slow_load: DEFAULT_SLOW_LOAD,
        }
    }

    pub fn with_slow_load(mut self, slow_load: Duration) -> Self {
        self.slow_load = slow_load;
        self
    }

    /// Call the products route once
    pub async fn fetch(&self, req: &SearchRequest) -> Result<Vec<Product>, SearchError> {
        let q = serde_json::to_string(req).map_err(SearchError::malformed)?;
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("q", q)])
            .send()
            .await
            .map_err(SearchError::upstream)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(SearchError::malformed(format!("products route answered {}", status)));
        }
        if !status.is_success() {
            return Err(SearchError::upstream(format!("products route answered {}", status)));
        }
        response
            .json::<Vec<Product>>()
            .await
            .map_err(SearchError::upstream)
    }

    /// Run the fetch a ticket stands for, bounded by the slow-load threshold
    pub async fn load(&self, ticket: &FetchTicket) -> FetchOutcome {
        match tokio::time::timeout(self.slow_load, self.fetch(&ticket.request)).await {
            Ok(Ok(products)) => FetchOutcome::Fetched(products),
            Ok(Err(e)) => {
                tracing::warn!("Fetch abandoned: {}", e);
                FetchOutcome::Abandoned
            }
            Err(_) => {
                tracing::warn!("Fetch abandoned: slower than {:?}", self.slow_load);
                FetchOutcome::Abandoned
            }
        }
    }

    /// Perform the fetch the session is waiting for, if any.
    ///
    /// Returns `None` when no fetch was due.
    pub async fn refresh(&self, session: &mut SearchSession) -> Option<Completion> {
        let ticket = session.begin_fetch()?;
        let outcome = self.load(&ticket).await;
        Some(session.complete(&ticket, outcome))
    }
}
