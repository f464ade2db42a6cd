//! # Shiptrack Domain
//!
//! Business domain types and models for shiptrack.
//!
//! This crate contains:
//! - Carrier-agnostic tracking types (TrackingStatus, Checkpoint, ...)
//! - Carrier-native record shapes shared between adapters and core logic
//! - Domain error types and Result definitions
//! - Configuration structures and domain constants
//!
//! ## Architecture
//! - No dependencies on other shiptrack crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{BatchConfig, Config, UpsCredentials, UspsCredentials};
pub use errors::{Result, ShiptrackError};
pub use types::batch::{FetchOutcome, PartialFailureWarning, WorkUnit};
pub use types::records::{RawCarrierRecord, UpsActivity, UpsPackage, UpsShipment, UspsTrackInfo};
pub use types::status::{Carrier, Checkpoint, NormalizedResult, TrackingStatus};
pub use types::{TrackOutput, TrackingReport};
