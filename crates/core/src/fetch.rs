//! Concurrent fetch fan-out
//!
//! Issues every work unit's fetch concurrently against one carrier client,
//! joins before anything is normalized, and books failures per identifier.
//! Completion order is not guaranteed and nothing downstream may depend on
//! it. Fan-out is bounded by the unit count (input size / chunk size); there
//! is no worker pool and no implicit rate limiting.

use futures::future::join_all;
use shiptrack_domain::{FetchOutcome, WorkUnit};
use tracing::{debug, warn};

use crate::ports::CarrierClient;

/// Run every unit's fetch concurrently and aggregate the outcome.
///
/// A unit that returns an error fails all N identifiers it covered - once the
/// carrier fails the whole call there is no telling which identifier was at
/// fault. A unit that succeeds but yields no record for some identifier it
/// covered (a dropped malformed record) fails just those identifiers. Sibling
/// units are never aborted; nothing is retried.
///
/// When the observed failure rate exceeds the warning threshold the outcome
/// carries a [`PartialFailureWarning`](shiptrack_domain::PartialFailureWarning)
/// and a `tracing` warning is emitted; the batch still returns whatever
/// succeeded.
pub async fn fetch_all(units: &[WorkUnit], client: &dyn CarrierClient) -> FetchOutcome {
    let total_identifiers: usize = units.iter().map(WorkUnit::len).sum();

    let fetches = units.iter().map(|unit| async move { (unit, client.fetch(unit).await) });
    let joined = join_all(fetches).await;

    let mut succeeded = Vec::new();
    let mut failed_identifiers = Vec::new();

    for (unit, result) in joined {
        match result {
            Ok(records) => {
                // Identifiers the unit covered but no record resolved to are
                // failed lookups, even though the unit itself succeeded.
                for id in &unit.identifiers {
                    if !records.iter().any(|record| record.tracking_number() == id) {
                        failed_identifiers.push(id.clone());
                    }
                }
                succeeded.extend(records);
            }
            Err(err) => {
                debug!(
                    carrier = %unit.carrier,
                    identifiers = unit.len(),
                    error = %err,
                    "work unit failed; booking all covered identifiers as failed"
                );
                failed_identifiers.extend(unit.identifiers.iter().cloned());
            }
        }
    }

    let outcome = FetchOutcome::new(succeeded, failed_identifiers, total_identifiers);
    if let Some(warning) = outcome.warning() {
        warn!(
            failure_rate = warning.failure_rate,
            failed = warning.failed_identifiers.len(),
            total = outcome.total_identifiers,
            "failed to get tracking data for more than the warning threshold of shipments"
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use shiptrack_domain::{
        Carrier, RawCarrierRecord, Result, ShiptrackError, UspsTrackInfo, WorkUnit,
    };

    use super::*;
    use crate::batch;

    /// Carrier client stub that fails a configurable set of identifiers and
    /// answers after a per-unit delay so completion order scrambles.
    struct StubClient {
        carrier: Carrier,
        reject: Vec<String>,
        delay: Option<Duration>,
    }

    impl StubClient {
        fn usps(reject: &[&str]) -> Self {
            Self {
                carrier: Carrier::Usps,
                reject: reject.iter().map(|s| (*s).to_string()).collect(),
                delay: None,
            }
        }
    }

    fn usps_record(id: &str) -> RawCarrierRecord {
        RawCarrierRecord::Usps(UspsTrackInfo {
            id: id.to_string(),
            status: None,
            status_category: Some("In Transit".to_string()),
            status_summary: None,
            event_date: None,
            event_time: None,
            event_city: None,
            event_state: None,
        })
    }

    #[async_trait]
    impl CarrierClient for StubClient {
        fn carrier(&self) -> Carrier {
            self.carrier
        }

        async fn fetch(&self, unit: &WorkUnit) -> Result<Vec<RawCarrierRecord>> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if unit.identifiers.iter().all(|id| self.reject.contains(id)) {
                return Err(ShiptrackError::CarrierRejected("unit rejected".into()));
            }
            Ok(unit
                .identifiers
                .iter()
                .filter(|id| !self.reject.contains(*id))
                .map(|id| usps_record(id))
                .collect())
        }
    }

    fn identifiers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ID{i:03}")).collect()
    }

    #[tokio::test]
    async fn clean_batch_has_no_failures() {
        let ids = identifiers(12);
        let units = batch::plan(&ids, Carrier::Usps);
        let client = StubClient::usps(&[]);

        let outcome = fetch_all(&units, &client).await;

        assert_eq!(outcome.succeeded.len(), 12);
        assert!(outcome.failed_identifiers.is_empty());
        assert_eq!(outcome.total_identifiers, 12);
        assert_eq!(outcome.failure_rate, 0.0);
    }

    #[tokio::test]
    async fn dropped_records_fail_only_their_identifiers() {
        let ids = identifiers(10);
        let units = batch::plan(&ids, Carrier::Usps);
        let client = StubClient::usps(&["ID003"]);

        let outcome = fetch_all(&units, &client).await;

        assert_eq!(outcome.succeeded.len(), 9);
        assert_eq!(outcome.failed_identifiers, vec!["ID003".to_string()]);
    }

    #[tokio::test]
    async fn failed_unit_fails_every_identifier_it_covered() {
        // 12 identifiers -> chunks of 10 + 2; the second chunk fails whole.
        let ids = identifiers(12);
        let units = batch::plan(&ids, Carrier::Usps);
        let client = StubClient::usps(&["ID010", "ID011"]);

        let outcome = fetch_all(&units, &client).await;

        assert_eq!(outcome.succeeded.len(), 10);
        assert_eq!(
            outcome.failed_identifiers,
            vec!["ID010".to_string(), "ID011".to_string()]
        );
    }

    #[tokio::test]
    async fn warning_thresholds_match_policy() {
        let ids = identifiers(100);
        let units = batch::plan(&ids, Carrier::Ups);

        let reject: Vec<&str> = vec!["ID000", "ID001", "ID002", "ID003", "ID004", "ID005"];
        let client =
            StubClient { carrier: Carrier::Ups, reject: reject.iter().map(|s| (*s).to_string()).collect(), delay: None };
        let outcome = fetch_all(&units, &client).await;
        assert!((outcome.failure_rate - 0.06).abs() < f64::EPSILON);
        assert!(outcome.warning().is_some());

        let reject: Vec<&str> = vec!["ID000", "ID001", "ID002", "ID003"];
        let client =
            StubClient { carrier: Carrier::Ups, reject: reject.iter().map(|s| (*s).to_string()).collect(), delay: None };
        let outcome = fetch_all(&units, &client).await;
        assert!((outcome.failure_rate - 0.04).abs() < f64::EPSILON);
        assert!(outcome.warning().is_none());
    }

    #[tokio::test]
    async fn outcome_does_not_depend_on_completion_order() {
        let ids = identifiers(30);
        let units = batch::plan(&ids, Carrier::Usps);
        let client = StubClient {
            carrier: Carrier::Usps,
            reject: vec!["ID007".to_string()],
            delay: Some(Duration::from_millis(5)),
        };

        let outcome = fetch_all(&units, &client).await;

        assert_eq!(outcome.succeeded.len(), 29);
        assert_eq!(outcome.failed_identifiers, vec!["ID007".to_string()]);
    }
}
