//! Carrier-agnostic tracking vocabulary
//!
//! `TrackingStatus` is the shared status enum both carriers normalize into;
//! `Checkpoint` and `NormalizedResult` are the carrier-agnostic output schema.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Supported carriers. One batch call addresses exactly one carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Carrier {
    /// United Parcel Service: JSON API, one identifier per request.
    Ups,
    /// United States Postal Service: XML API, up to 10 identifiers per request.
    Usps,
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::Ups => write!(f, "UPS"),
            Carrier::Usps => write!(f, "USPS"),
        }
    }
}

/// Shared, carrier-agnostic shipment status.
///
/// Carrier-native vocabularies map into this enum via the status catalog;
/// strings the catalog does not know become [`TrackingStatus::Unknown`]
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingStatus {
    /// Label created or billing information received; not yet moving.
    PreShipment,
    /// Somewhere between origin and destination (includes carrier pickup).
    InTransit,
    /// On a vehicle for delivery today.
    OutForDelivery,
    /// Delivered to the recipient or an agent.
    Delivered,
    /// A delivery attempt was made but not completed (USPS).
    DeliveredAttempted,
    /// Held for the recipient to collect (USPS).
    DeliveredAvailableForPickup,
    /// The carrier flagged a problem with the shipment.
    Exception,
    /// Heading back to the shipper.
    ReturnToSender,
    /// Shipment voided before it moved.
    Cancelled,
    /// Carrier reported a status this system does not recognize.
    Unknown,
}

impl TrackingStatus {
    /// Human-readable display name, stable across carriers.
    pub fn display_name(&self) -> &'static str {
        match self {
            TrackingStatus::PreShipment => "Pre-Shipment",
            TrackingStatus::InTransit => "In Transit",
            TrackingStatus::OutForDelivery => "Out for Delivery",
            TrackingStatus::Delivered => "Delivered",
            TrackingStatus::DeliveredAttempted => "Delivered - Delivery Attempt",
            TrackingStatus::DeliveredAvailableForPickup => "Delivered - Available for Pickup",
            TrackingStatus::Exception => "Exception",
            TrackingStatus::ReturnToSender => "Return to Sender",
            TrackingStatus::Cancelled => "Cancelled",
            TrackingStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One point-in-time status event for a shipment.
///
/// Timestamps are carrier-local naive datetimes; the carriers do not report a
/// timezone. Any field the carrier omitted (or that failed to parse) is
/// `None` rather than a parse failure for the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// When the event happened, if the carrier's date/time fields parsed.
    pub timestamp: Option<NaiveDateTime>,
    /// `"CITY, STATE, US"`, uppercased, when both city and state are present.
    pub location: Option<String>,
    /// Carrier-supplied status message for the event.
    pub message: Option<String>,
    /// Normalized status at this checkpoint.
    pub status: TrackingStatus,
}

/// Carrier-agnostic result for one tracking identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// The carrier-assigned identifier the caller looked up.
    pub tracking_number: String,
    /// Normalized overall status.
    pub status: TrackingStatus,
    /// Latest checkpoint backing that status.
    pub checkpoint: Checkpoint,
}
