//! Port interfaces for carrier lookups
//!
//! These traits define the boundary between core business logic and the
//! carrier API adapters in infra.

use async_trait::async_trait;
use shiptrack_domain::{Carrier, RawCarrierRecord, Result, WorkUnit};

/// One carrier's tracking API, as the pipeline sees it.
///
/// An implementation owns its credentials and HTTP transport and knows how to
/// turn one [`WorkUnit`] into one wire request. Partial success within a unit
/// is first-class: a fetch may return fewer records than the unit covers
/// (dropped malformed records); the fetcher books the uncovered identifiers
/// as failed. A returned error fails every identifier the unit covers.
///
/// Adding a third carrier means adding a new implementation and registering
/// it with the service; existing clients are untouched.
#[async_trait]
pub trait CarrierClient: Send + Sync {
    /// Which carrier this client speaks to.
    fn carrier(&self) -> Carrier;

    /// Issue the unit's wire request and parse the response into
    /// carrier-native records, one per resolvable identifier.
    async fn fetch(&self, unit: &WorkUnit) -> Result<Vec<RawCarrierRecord>>;
}
