// web_app/mod.rs - Root module for the product search application
//
// Architecture:
// - model/: Shared data types (used by both page and server)
// - pages/: Page state machine (pure)
// - session.rs: Ticketed fetch bookkeeping, last-request-wins (pure)
// - error.rs: Error kinds and their propagation
// - client.rs: Page-side fetcher for the products route (hydrate)
// - config.rs: Environment configuration (SSR only)
// - api/: Request translation, upstream client and route (SSR only)

pub mod error;
pub mod model;
pub mod pages;
pub mod session;

// Page-side HTTP fetcher, available to both server and client builds
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod client;

#[cfg(feature = "ssr")]
pub mod config;

#[cfg(feature = "ssr")]
pub mod api;

pub use error::SearchError;
