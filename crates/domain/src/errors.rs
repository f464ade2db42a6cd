//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for shiptrack
///
/// Per-identifier lookup failures are absorbed into
/// [`FetchOutcome::failed_identifiers`](crate::types::batch::FetchOutcome)
/// rather than propagated; these variants surface only where an operation as
/// a whole cannot continue (or, for `CarrierRejected`/`MalformedRecord`, as
/// the per-unit failure a fetch returns before that absorption happens).
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ShiptrackError {
    /// Network-level failure: DNS, connect, request timeout. Carrier-opaque.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The carrier answered and explicitly faulted the lookup.
    #[error("Carrier rejected lookup: {0}")]
    CarrierRejected(String),

    /// The response parsed but a record is missing required fields.
    #[error("Malformed carrier record: {0}")]
    MalformedRecord(String),

    /// Configuration error: missing or invalid settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failure against a carrier API.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Caller-supplied input the pipeline cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The whole batch was aborted; no partial results survive.
    #[error("Batch aborted: {0}")]
    Timeout(String),

    /// Invariant violation inside the pipeline.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for shiptrack operations
pub type Result<T> = std::result::Result<T, ShiptrackError>;
