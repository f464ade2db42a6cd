//! Carrier-native parsed records
//!
//! The carrier clients parse wire payloads into these shapes; the normalizer
//! pattern-matches on the [`RawCarrierRecord`] sum type instead of duck-typing
//! field access. In raw output mode these records are returned to the caller
//! untranslated (they serialize to the carrier's own vocabulary).

use serde::{Deserialize, Serialize};

/// A carrier-native record for exactly one tracking number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "carrier", rename_all = "UPPERCASE")]
pub enum RawCarrierRecord {
    /// UPS shipment record, possibly with multiple package sub-records.
    Ups(UpsShipment),
    /// One USPS `TrackInfo` entry from a bulk response.
    Usps(UspsTrackInfo),
}

impl RawCarrierRecord {
    /// The tracking number this record resolves to.
    pub fn tracking_number(&self) -> &str {
        match self {
            RawCarrierRecord::Ups(shipment) => &shipment.inquiry_number,
            RawCarrierRecord::Usps(info) => &info.id,
        }
    }
}

/// UPS shipment as returned for one inquiry number.
///
/// A split shipment carries several packages under one inquiry number; rank
/// resolution over the package statuses happens in the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsShipment {
    /// The inquiry (tracking) number the shipment was looked up by.
    pub inquiry_number: String,
    /// Package sub-records; at least one for a well-formed response.
    pub packages: Vec<UpsPackage>,
}

/// One package inside a UPS shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsPackage {
    /// Package-level tracking number, when distinct from the inquiry number.
    pub tracking_number: Option<String>,
    /// Activity events, newest first as UPS reports them.
    pub activity: Vec<UpsActivity>,
}

impl UpsPackage {
    /// The most recent activity event, if the package has any.
    pub fn latest_activity(&self) -> Option<&UpsActivity> {
        self.activity.first()
    }
}

/// One UPS activity event, in UPS vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsActivity {
    /// UPS status type code, e.g. `"D"` for Delivered.
    pub status_code: Option<String>,
    /// UPS status description for the event.
    pub description: Option<String>,
    /// Event date as `YYYYMMDD`.
    pub date: Option<String>,
    /// Event time as `HHMMSS`.
    pub time: Option<String>,
    /// Event city, when UPS reported a location.
    pub city: Option<String>,
    /// Event state/province code.
    pub state: Option<String>,
}

/// One USPS `TrackInfo` entry, in USPS vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UspsTrackInfo {
    /// Tracking identifier (`@ID` attribute on the wire).
    pub id: String,
    /// Free-form status line, e.g. "Delivered, In/At Mailbox".
    pub status: Option<String>,
    /// Status category the catalog maps, e.g. "Delivered", "In Transit".
    pub status_category: Option<String>,
    /// Longer status summary sentence.
    pub status_summary: Option<String>,
    /// Event date, e.g. "May 5, 2021".
    pub event_date: Option<String>,
    /// Event time, e.g. "1:36 pm".
    pub event_time: Option<String>,
    /// Event city.
    pub event_city: Option<String>,
    /// Event state.
    pub event_state: Option<String>,
}
