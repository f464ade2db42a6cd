//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Maximum identifiers per USPS bulk tracking request.
pub const USPS_CHUNK_SIZE: usize = 10;

/// Failure rate above which a batch surfaces a partial-failure warning.
pub const FAILURE_RATE_WARN_THRESHOLD: f64 = 0.05;

// Carrier endpoints
/// UPS JSON Track API endpoint.
pub const UPS_TRACK_URL: &str = "https://onlinetools.ups.com/json/Track";
/// USPS Web Tools endpoint; the TrackV2 API is selected via query string.
pub const USPS_TRACK_URL: &str = "https://secure.shippingapis.com/ShippingAPI.dll";

// Checkpoint timestamp formats, carrier-native
/// UPS activity timestamps: concatenated `Date` + `Time` fields.
pub const UPS_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
/// USPS event timestamps: `EventDate` + `EventTime`, e.g. "May 5, 2021 1:36 pm".
pub const USPS_TIMESTAMP_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
