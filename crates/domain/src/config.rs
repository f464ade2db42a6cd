//! Configuration structures
//!
//! Credentials are handed to the carrier clients by the hosting application;
//! the tracking core never stores them. The structs here are the serde shapes
//! the infra loader fills from environment variables or a config file.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Root configuration for the tracking aggregator.
///
/// Each carrier section is optional; a deployment that only tracks USPS
/// shipments does not need UPS credentials. At least one carrier must be
/// configured for the loader to accept the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UPS account credentials, if UPS tracking is enabled.
    pub ups: Option<UpsCredentials>,
    /// USPS Web Tools credentials, if USPS tracking is enabled.
    pub usps: Option<UspsCredentials>,
    /// Batch-level settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

/// UPS account credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsCredentials {
    /// UPS account username.
    pub username: String,
    /// UPS account password.
    pub password: String,
    /// UPS access license number.
    pub license: String,
}

/// USPS Web Tools credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UspsCredentials {
    /// USPS Web Tools user id.
    pub user_id: String,
    /// Source system identifier sent with each request.
    pub source_id: String,
}

/// Batch-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Abort the whole batch after this many seconds. `None` disables the
    /// batch timeout; per-request timeouts still apply.
    pub timeout_seconds: Option<u64>,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { timeout_seconds: None, request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS }
    }
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
