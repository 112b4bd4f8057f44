// web_app/api/upstream.rs - Client for the hosted REST product database
//
// One GET per search against `<base>/products`, authenticated with the
// `x-apikey` header. The decoded body is relayed as-is: a plain search
// answers an array of records, a `groupBy` search answers an object keyed
// by group value, and `$fields` hints project records down to a subset of
// fields. Transport errors, timeouts, non-2xx statuses and bodies that are
// not JSON surface as UpstreamUnavailable. No retries.

use reqwest::Client;
use serde_json::Value;

use crate::web_app::api::queries::to_upstream_query;
use crate::web_app::config::UpstreamConfig;
use crate::web_app::error::SearchError;
use crate::web_app::model::SearchRequest;

pub const API_KEY_HEADER: &str = "x-apikey";

/// Shared handle to the upstream service.
///
/// Cheap to clone: the underlying reqwest client pools connections.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SearchError::upstream)?;
        tracing::info!("Upstream client ready for {}", config.base_url);
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Fetch one page of products for a search request, undecoded beyond JSON
    pub async fn fetch_products(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        let url = to_upstream_query(req).products_url(&self.config.base_url);
        tracing::debug!("Upstream request: {}", url);

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Upstream transport error: {}", e);
                SearchError::upstream(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Upstream answered {}", status);
            return Err(SearchError::upstream(format!("status {}", status)));
        }

        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Upstream body read failed: {}", e);
            SearchError::upstream(e)
        })?;

        serde_json::from_slice::<Value>(&body).map_err(|e| {
            tracing::error!("Upstream body is not JSON: {}", e);
            SearchError::upstream(e)
        })
    }
}
