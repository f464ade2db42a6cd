//! # Shiptrack Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP client wrapper
//! - Carrier API adapters (UPS JSON, USPS XML) implementing `CarrierClient`
//! - Error conversions from transport errors into domain errors
//! - The configuration loader (environment or file)
//!
//! ## Architecture
//! - Implements traits defined in `shiptrack-core`
//! - Depends on `shiptrack-domain` and `shiptrack-core`
//! - Contains all "impure" code (network I/O, environment access)

pub mod carriers;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use carriers::ups::UpsClient;
pub use carriers::usps::UspsClient;
pub use errors::InfraError;
pub use http::HttpClient;
