//! Result normalization
//!
//! Converts carrier-native records into the shared output schema. Status
//! strings go through the catalog (unmapped → `Unknown`, never an error),
//! timestamps and locations fall back to `None` instead of failing a record,
//! and UPS multi-package records resolve to the most advanced package by
//! progress rank.

use chrono::NaiveDateTime;
use shiptrack_domain::constants::{UPS_TIMESTAMP_FORMAT, USPS_TIMESTAMP_FORMAT};
use shiptrack_domain::{
    Checkpoint, NormalizedResult, RawCarrierRecord, UpsActivity, UpsShipment, UspsTrackInfo,
};
use tracing::debug;

use crate::catalog;

/// Normalize a batch's records.
///
/// One result per record that carries enough to resolve; records with no
/// usable activity are omitted (callers diff against their input list to
/// detect omissions - that is a documented caller responsibility).
pub fn normalize(records: &[RawCarrierRecord]) -> Vec<NormalizedResult> {
    records.iter().filter_map(normalize_record).collect()
}

fn normalize_record(record: &RawCarrierRecord) -> Option<NormalizedResult> {
    match record {
        RawCarrierRecord::Ups(shipment) => normalize_ups(shipment),
        RawCarrierRecord::Usps(info) => Some(normalize_usps(info)),
    }
}

/// Pick the package whose latest activity maps to the highest progress rank;
/// ties keep the first-encountered package. A package with no activity is
/// skipped; a shipment where every package is empty yields nothing.
fn select_ups_activity(shipment: &UpsShipment) -> Option<&UpsActivity> {
    let mut best: Option<(&UpsActivity, u8)> = None;
    for package in &shipment.packages {
        let Some(latest) = package.latest_activity() else {
            debug!(
                tracking_number = %shipment.inquiry_number,
                "UPS package without activity skipped during rank resolution"
            );
            continue;
        };
        let rank = latest.status_code.as_deref().map(catalog::ups_rank).unwrap_or(0);
        match best {
            Some((_, best_rank)) if rank <= best_rank => {}
            _ => best = Some((latest, rank)),
        }
    }
    best.map(|(activity, _)| activity)
}

fn normalize_ups(shipment: &UpsShipment) -> Option<NormalizedResult> {
    let activity = select_ups_activity(shipment)?;
    // An absent status code goes through the catalog like any unmapped string.
    let status = catalog::ups_status(activity.status_code.as_deref().unwrap_or(""));

    let timestamp = match (&activity.date, &activity.time) {
        (Some(date), Some(time)) => {
            parse_timestamp(&format!("{date}{time}"), UPS_TIMESTAMP_FORMAT)
        }
        _ => None,
    };
    let location = build_location(activity.city.as_deref(), activity.state.as_deref());

    Some(NormalizedResult {
        tracking_number: shipment.inquiry_number.clone(),
        status,
        checkpoint: Checkpoint {
            timestamp,
            location,
            message: activity.description.clone(),
            status,
        },
    })
}

fn normalize_usps(info: &UspsTrackInfo) -> NormalizedResult {
    let status = catalog::usps_status(info.status_category.as_deref().unwrap_or(""));

    let timestamp = match (&info.event_date, &info.event_time) {
        (Some(date), Some(time)) => {
            parse_timestamp(&format!("{date} {time}"), USPS_TIMESTAMP_FORMAT)
        }
        _ => None,
    };
    let location = build_location(info.event_city.as_deref(), info.event_state.as_deref());
    let message = match (&info.status, &info.status_summary) {
        (Some(status_line), Some(summary)) => Some(format!("{status_line} - {summary}")),
        _ => None,
    };

    NormalizedResult {
        tracking_number: info.id.clone(),
        status,
        checkpoint: Checkpoint { timestamp, location, message, status },
    }
}

fn parse_timestamp(raw: &str, format: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(raw, format) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(raw, format, error = %err, "checkpoint timestamp failed to parse");
            None
        }
    }
}

/// `"CITY, STATE, US"` uppercased when both parts are present, else `None`.
fn build_location(city: Option<&str>, state: Option<&str>) -> Option<String> {
    match (city, state) {
        (Some(city), Some(state)) => Some(format!("{city}, {state}, US").to_uppercase()),
        _ => None,
    }
}
