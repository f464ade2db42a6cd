//! Batch bookkeeping types
//!
//! Work units partition a batch's identifiers into carrier-appropriate
//! requests; the fetch outcome records what succeeded and, always, which
//! identifiers did not.

use serde::{Deserialize, Serialize};

use crate::constants::FAILURE_RATE_WARN_THRESHOLD;
use crate::types::records::RawCarrierRecord;
use crate::types::status::Carrier;

/// One carrier-appropriate unit of work: a single wire request covering
/// 1..N identifiers (N=1 for UPS, N≤10 for USPS).
///
/// The wire payload itself is built by the carrier client at fetch time, so
/// the planner stays free of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkUnit {
    /// Carrier this unit will be issued against.
    pub carrier: Carrier,
    /// Identifiers covered by this unit, in input order.
    pub identifiers: Vec<String>,
}

impl WorkUnit {
    /// Create a unit covering the given identifiers.
    pub fn new(carrier: Carrier, identifiers: Vec<String>) -> Self {
        Self { carrier, identifiers }
    }

    /// Number of identifiers this unit covers.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// True for a unit covering no identifiers (an empty plan never issues one).
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Aggregate result of fanning a batch's units out against one carrier.
///
/// Immutable once the batch joins: the failure rate is computed exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Flat list of carrier-native records across all succeeded units.
    pub succeeded: Vec<RawCarrierRecord>,
    /// Every identifier covered by a failed unit, or dropped as malformed.
    pub failed_identifiers: Vec<String>,
    /// Identifiers requested in this batch (the failure-rate denominator).
    pub total_identifiers: usize,
    /// `failed / total`; `0.0` for an empty batch.
    pub failure_rate: f64,
}

impl FetchOutcome {
    /// Build an outcome, computing the failure rate from its parts.
    pub fn new(
        succeeded: Vec<RawCarrierRecord>,
        failed_identifiers: Vec<String>,
        total_identifiers: usize,
    ) -> Self {
        let failure_rate = if total_identifiers == 0 {
            0.0
        } else {
            failed_identifiers.len() as f64 / total_identifiers as f64
        };
        Self { succeeded, failed_identifiers, total_identifiers, failure_rate }
    }

    /// The partial-failure observation, when the failure rate crosses the
    /// warning threshold. Non-fatal: the caller decides what to do with it.
    pub fn warning(&self) -> Option<PartialFailureWarning> {
        if self.failure_rate > FAILURE_RATE_WARN_THRESHOLD {
            Some(PartialFailureWarning {
                failed_identifiers: self.failed_identifiers.clone(),
                failure_rate: self.failure_rate,
            })
        } else {
            None
        }
    }
}

/// Batch-level observation that too many lookups failed.
///
/// Emitted alongside the outcome, never instead of it; nothing is retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialFailureWarning {
    /// The identifiers that failed in this batch.
    pub failed_identifiers: Vec<String>,
    /// The observed failure rate that triggered the warning.
    pub failure_rate: f64,
}
