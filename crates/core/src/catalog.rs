//! Status catalog
//!
//! Static mapping tables from each carrier's native status vocabulary to the
//! shared [`TrackingStatus`], plus a progress rank per UPS status code used
//! to pick the most advanced package when one tracking number covers several.
//!
//! The tables are module-scope constants: initialized at compile time,
//! read-only, safe to share across concurrent batches without locking.

use shiptrack_domain::TrackingStatus;

/// A status further along this ordering wins multi-package resolution:
/// Delivered > Out for Delivery > In Transit > Pickup > Pre-Shipment >
/// Billing Voided > Not Available > Return to Sender > Exception.
/// Unmapped codes rank 0 and never win over a recognized status.
const UPS_STATUS_TABLE: &[(&str, TrackingStatus, u8)] = &[
    ("D", TrackingStatus::Delivered, 9),
    ("O", TrackingStatus::OutForDelivery, 8),
    ("I", TrackingStatus::InTransit, 7),
    // "P" is UPS "Pickup"; it normalizes to In Transit but keeps its own rank.
    ("P", TrackingStatus::InTransit, 6),
    // "M" is "Billing Information Received" - the label exists, nothing moved.
    ("M", TrackingStatus::PreShipment, 5),
    // "MV" is "Billing Information Voided".
    ("MV", TrackingStatus::Cancelled, 4),
    // "NA" is UPS "Not Available"; no shared status expresses that.
    ("NA", TrackingStatus::Unknown, 3),
    ("RS", TrackingStatus::ReturnToSender, 2),
    ("X", TrackingStatus::Exception, 1),
];

/// USPS `StatusCategory` strings as the Track API reports them.
const USPS_STATUS_TABLE: &[(&str, TrackingStatus)] = &[
    ("Delivered", TrackingStatus::Delivered),
    ("Delivered to Agent", TrackingStatus::Delivered),
    ("Alert", TrackingStatus::Exception),
    ("In Transit", TrackingStatus::InTransit),
    ("Out for Delivery", TrackingStatus::OutForDelivery),
    ("Pre-Shipment", TrackingStatus::PreShipment),
    ("Delivery Attempt", TrackingStatus::DeliveredAttempted),
    ("Available for Pickup", TrackingStatus::DeliveredAvailableForPickup),
];

/// Normalize a UPS status type code. Unmapped codes become `Unknown`.
pub fn ups_status(code: &str) -> TrackingStatus {
    UPS_STATUS_TABLE
        .iter()
        .find(|(native, _, _)| *native == code)
        .map(|(_, status, _)| *status)
        .unwrap_or(TrackingStatus::Unknown)
}

/// Progress rank for a UPS status type code. Unmapped codes rank 0.
pub fn ups_rank(code: &str) -> u8 {
    UPS_STATUS_TABLE
        .iter()
        .find(|(native, _, _)| *native == code)
        .map(|(_, _, rank)| *rank)
        .unwrap_or(0)
}

/// Normalize a USPS status category. Unmapped categories become `Unknown`.
pub fn usps_status(category: &str) -> TrackingStatus {
    USPS_STATUS_TABLE
        .iter()
        .find(|(native, _)| *native == category)
        .map(|(_, status)| *status)
        .unwrap_or(TrackingStatus::Unknown)
}
