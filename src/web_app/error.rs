// web_app/error.rs - Error kinds shared by the reducer, translator and route
//
// Each variant maps to one propagation path:
// - InvalidAction: programming error on the page side
// - MalformedRequest: client error, answered with 400
// - UpstreamUnavailable: degraded response, answered with 502

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A serialized action carried an unknown type tag or a payload of the wrong shape
    #[error("{0} is not a valid action type")]
    InvalidAction(String),

    /// The inbound `q` parameter is missing, not JSON, or misses a required field
    #[error("malformed search request: {0}")]
    MalformedRequest(String),

    /// The upstream call failed at the transport, status or decoding level
    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl SearchError {
    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        SearchError::MalformedRequest(detail.to_string())
    }

    pub fn upstream(detail: impl std::fmt::Display) -> Self {
        SearchError::UpstreamUnavailable(detail.to_string())
    }
}
