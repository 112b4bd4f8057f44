// common/mod.rs - Shared test utilities for the products route
//
// This module provides:
// 1. A fake upstream REST database (an in-process actix-web server on an
//    ephemeral port) that records what it receives
// 2. A helper that serves the real products route in front of it
// 3. Product fixtures

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use product_quicksearch::web_app::api::handlers;
use product_quicksearch::web_app::api::upstream::{UpstreamClient, API_KEY_HEADER};
use product_quicksearch::web_app::config::{ApiKey, UpstreamConfig};
use product_quicksearch::web_app::model::Product;
use reqwest::Url;
use serde_json::{json, Value};

pub const TEST_API_KEY: &str = "test-api-key";

/// How the fake upstream answers `GET /rest/products`
#[derive(Clone, Debug)]
pub enum UpstreamBehavior {
    Products(Value),
    Status(u16),
    NotJson,
    Slow(Duration, Value),
}

/// One request as seen by the fake upstream
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub query: String,
}

impl RecordedRequest {
    /// Decoded query parameters in arrival order
    pub fn params(&self) -> Vec<(String, String)> {
        let url = Url::parse(&format!("http://fake.local/?{}", self.query)).expect("query parses");
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.params().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

#[derive(Clone)]
struct FakeState {
    behavior: UpstreamBehavior,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeUpstream {
    pub base_url: Url,
    handle: ServerHandle,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn config(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.base_url.clone(),
            api_key: ApiKey::new(TEST_API_KEY),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn client(&self) -> UpstreamClient {
        UpstreamClient::new(self.config()).expect("client builds")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn fake_products(req: HttpRequest, state: web::Data<FakeState>) -> HttpResponse {
    state.recorded.lock().unwrap().push(RecordedRequest {
        api_key: req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query: req.query_string().to_string(),
    });

    match &state.behavior {
        UpstreamBehavior::Products(body) => HttpResponse::Ok().json(body),
        UpstreamBehavior::Status(code) => {
            HttpResponse::build(actix_web::http::StatusCode::from_u16(*code).unwrap())
                .body("upstream says no")
        }
        UpstreamBehavior::NotJson => HttpResponse::Ok()
            .content_type("text/html")
            .body("<html>maintenance</html>"),
        UpstreamBehavior::Slow(delay, body) => {
            actix_web::rt::time::sleep(*delay).await;
            HttpResponse::Ok().json(body)
        }
    }
}

/// Start a fake upstream. Must run inside an actix system (`#[actix_web::test]`).
pub async fn spawn_fake_upstream(behavior: UpstreamBehavior) -> anyhow::Result<FakeUpstream> {
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(FakeState {
        behavior,
        recorded: recorded.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/rest/products", web::get().to(fake_products))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok(FakeUpstream {
        base_url: Url::parse(&format!("http://{}/rest", addr))?,
        handle,
        recorded,
    })
}

/// Serve the real products route in front of an upstream client
pub async fn spawn_products_server(upstream: UpstreamClient) -> anyhow::Result<(Url, ServerHandle)> {
    let upstream = web::Data::new(upstream);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(upstream.clone())
            .configure(handlers::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((
        Url::parse(&format!("http://{}{}", addr, handlers::PRODUCTS_PATH))?,
        handle,
    ))
}

/// `/api/products?q=<encoded>` for in-process route tests
pub fn products_uri(q: &str) -> String {
    let url = Url::parse_with_params("http://localhost/api/products", &[("q", q)])
        .expect("static base parses");
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

pub fn product(id: i64, name: &str, vintage: &str) -> Product {
    Product {
        record_id: format!("5f{:04}", id),
        numeric_id: id,
        name: name.to_string(),
        abv: "13.5".to_string(),
        vintage_year: vintage.to_string(),
    }
}

/// Upstream-shaped JSON for a handful of products
pub fn upstream_products() -> Value {
    json!([
        { "_id": "5f0001", "id": 1, "name": "Barolo Riserva", "abv": "14.5", "vintage_year": "2013" },
        { "_id": "5f0002", "id": 2, "name": "Chablis Premier Cru", "abv": 12.5, "vintage_year": 2018 },
        { "_id": "5f0003", "id": 3, "name": "Rioja Gran Reserva", "abv": "13.5", "vintage_year": "2012" }
    ])
}
