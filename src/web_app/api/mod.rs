// web_app/api/mod.rs - API module for server-side logic
//
// Request translation, the upstream REST database client and the
// actix-web products route.

pub mod handlers;
pub mod queries;
pub mod upstream;
