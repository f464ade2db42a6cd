//! Common data types used throughout the application

pub mod batch;
pub mod records;
pub mod status;

use serde::{Deserialize, Serialize};

use crate::types::batch::PartialFailureWarning;
use crate::types::records::RawCarrierRecord;
use crate::types::status::NormalizedResult;

/// The payload of a completed batch, shaped by the caller's `simplify` choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", content = "records", rename_all = "snake_case")]
pub enum TrackOutput {
    /// Carrier-agnostic results, one per identifier that produced a record.
    Simplified(Vec<NormalizedResult>),
    /// Carrier-native parsed records with no status translation applied.
    Raw(Vec<RawCarrierRecord>),
}

/// Everything a caller gets back from one batch call.
///
/// A partial failure is never an error: the report always carries whatever
/// succeeded plus the explicit list of identifiers that did not. Callers that
/// need an identifier's absence explained diff `failed_identifiers` and the
/// output against their input list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingReport {
    /// Normalized or raw records, depending on the requested output mode.
    pub output: TrackOutput,
    /// Every identifier covered by a failed unit or unresolvable record.
    pub failed_identifiers: Vec<String>,
    /// `failed / total` for this batch, computed once.
    pub failure_rate: f64,
    /// Present when the failure rate crossed the warning threshold.
    pub warning: Option<PartialFailureWarning>,
}

impl TrackingReport {
    /// Number of records in the output, regardless of mode.
    pub fn len(&self) -> usize {
        match &self.output {
            TrackOutput::Simplified(results) => results.len(),
            TrackOutput::Raw(records) => records.len(),
        }
    }

    /// True when the batch produced no records at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
