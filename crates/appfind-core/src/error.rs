//! Error type returned by [`AppCatalog`](crate::catalog::AppCatalog)
//! implementations.

use thiserror::Error;

/// Why a catalogue call failed.
///
/// The `Display` output is what ends up in
/// [`SearchState::error`](crate::store::SearchState::error), so every message
/// is written for a person, not a log parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The server answered 2xx but reported an error in the body.
    #[error("{0}")]
    Api(String),
    /// The body could not be decoded as a catalogue response.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The query was rejected before any request was made.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
