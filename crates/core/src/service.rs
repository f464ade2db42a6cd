//! Tracking service - core use case
//!
//! Ties the pipeline together: plan the batch, fan the units out against the
//! selected carrier's client, join, then normalize (or pass raw records
//! through). One call addresses exactly one carrier.

use std::sync::Arc;
use std::time::Duration;

use shiptrack_domain::{Carrier, Result, ShiptrackError, TrackOutput, TrackingReport};
use tracing::{debug, info};

use crate::ports::CarrierClient;
use crate::{batch, fetch, normalize};

/// Shipment tracking service over a registry of carrier clients.
///
/// Supporting a new carrier means registering another [`CarrierClient`];
/// nothing here or in the existing clients changes.
pub struct TrackingService {
    clients: Vec<Arc<dyn CarrierClient>>,
    batch_timeout: Option<Duration>,
}

impl TrackingService {
    /// Create a service with no clients registered.
    pub fn new() -> Self {
        Self { clients: Vec::new(), batch_timeout: None }
    }

    /// Register a carrier client.
    pub fn with_client(mut self, client: Arc<dyn CarrierClient>) -> Self {
        self.clients.push(client);
        self
    }

    /// Abort any batch that runs longer than `timeout`.
    ///
    /// The timeout is batch-granular: when it fires, in-flight fetches are
    /// abandoned and already-collected successes are discarded as a whole.
    /// There is no per-identifier timeout distinct from this one.
    pub fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = Some(timeout);
        self
    }

    /// Track a batch of identifiers against one carrier.
    ///
    /// `simplify` selects the output mode: `true` returns carrier-agnostic
    /// [`NormalizedResult`](shiptrack_domain::NormalizedResult)s, `false`
    /// passes the carrier-native parsed records through untranslated.
    ///
    /// Partial failures never error: the report carries whatever succeeded
    /// plus `failed_identifiers` and, past the threshold, a warning. The only
    /// hard failures are an unregistered carrier and the batch timeout.
    pub async fn track(
        &self,
        carrier: Carrier,
        identifiers: &[String],
        simplify: bool,
    ) -> Result<TrackingReport> {
        let client = self
            .clients
            .iter()
            .find(|client| client.carrier() == carrier)
            .ok_or_else(|| {
                ShiptrackError::InvalidInput(format!("no client registered for carrier {carrier}"))
            })?;

        let units = batch::plan(identifiers, carrier);
        debug!(%carrier, identifiers = identifiers.len(), units = units.len(), "batch planned");

        let outcome = match self.batch_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch::fetch_all(&units, client.as_ref()))
                .await
                .map_err(|_| {
                    ShiptrackError::Timeout(format!(
                        "batch against {carrier} aborted after {limit:?}"
                    ))
                })?,
            None => fetch::fetch_all(&units, client.as_ref()).await,
        };

        let warning = outcome.warning();
        let output = if simplify {
            TrackOutput::Simplified(normalize::normalize(&outcome.succeeded))
        } else {
            TrackOutput::Raw(outcome.succeeded)
        };

        let report = TrackingReport {
            output,
            failed_identifiers: outcome.failed_identifiers,
            failure_rate: outcome.failure_rate,
            warning,
        };
        info!(
            %carrier,
            results = report.len(),
            failed = report.failed_identifiers.len(),
            "batch completed"
        );
        Ok(report)
    }
}

impl Default for TrackingService {
    fn default() -> Self {
        Self::new()
    }
}
