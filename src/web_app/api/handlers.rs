// web_app/api/handlers.rs - The products API route
//
// GET /api/products?q=<url-encoded JSON SearchRequest>
//
// Thin bridge: parse the request, hand it to the upstream client, relay
// whatever JSON the upstream answered. Every non-200 answer carries an
// empty JSON array so the page can always decode the body.
//
//   200 - upstream body, unchanged
//   400 - malformed `q`
//   405 - any method other than GET
//   502 - upstream unavailable

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::web_app::api::queries::parse_incoming;
use crate::web_app::api::upstream::UpstreamClient;
use crate::web_app::error::SearchError;

pub const PRODUCTS_PATH: &str = "/api/products";

#[derive(Debug, Deserialize)]
pub struct ProductsParams {
    pub q: Option<String>,
}

/// Register the products route on an actix-web app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(PRODUCTS_PATH)
            .route(web::get().to(get_products))
            .default_service(web::to(method_not_allowed)),
    );
}

fn empty_list(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(json!([]))
}

impl SearchError {
    /// HTTP status the products route answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            SearchError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            SearchError::InvalidAction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Search products through the upstream service
pub async fn get_products(req: HttpRequest, upstream: web::Data<UpstreamClient>) -> HttpResponse {
    let result: Result<Value, SearchError> = async {
        let params = web::Query::<ProductsParams>::from_query(req.query_string())
            .map_err(SearchError::malformed)?;
        let raw = params
            .into_inner()
            .q
            .ok_or_else(|| SearchError::malformed("missing `q` parameter"))?;
        let search = parse_incoming(&raw)?;

        tracing::info!(
            "Search request: filter={:?}, sort={:?}, ascending={}, page={}",
            search.filter,
            search.sort_by,
            search.ascending,
            search.page
        );
        upstream.fetch_products(&search).await
    }
    .await;

    match result {
        Ok(body) => {
            match &body {
                Value::Array(records) => {
                    tracing::info!("Search successful: found {} products", records.len())
                }
                Value::Object(groups) => {
                    tracing::info!("Search successful: found {} groups", groups.len())
                }
                _ => tracing::info!("Search successful"),
            }
            HttpResponse::Ok().json(body)
        }
        Err(e) => {
            match &e {
                SearchError::MalformedRequest(_) => tracing::warn!("Rejected search: {}", e),
                _ => tracing::error!("Search failed: {}", e),
            }
            empty_list(e.status_code())
        }
    }
}

async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    tracing::warn!("{} {} not allowed", req.method(), req.path());
    empty_list(StatusCode::METHOD_NOT_ALLOWED)
}
