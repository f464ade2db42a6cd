//! # Shiptrack Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The status catalog (carrier vocabulary → shared status + rank)
//! - Batch planning, concurrent fetch fan-out, result normalization
//! - The `CarrierClient` port the infra adapters implement
//! - The `TrackingService` use case tying the pipeline together
//!
//! ## Architecture Principles
//! - Only depends on `shiptrack-domain`
//! - No HTTP or platform code; network I/O lives behind the port
//! - Pure, testable business logic

pub mod batch;
pub mod catalog;
pub mod fetch;
pub mod normalize;
pub mod ports;
pub mod service;

// Re-export specific items to avoid ambiguity
pub use ports::CarrierClient;
pub use service::TrackingService;
