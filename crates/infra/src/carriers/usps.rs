//! USPS TrackV2 API client
//!
//! USPS takes bulk lookups: up to ten `TrackID` elements per request, the
//! whole request XML-encoded into a single `XML` query parameter of a GET.
//! The response is one `TrackInfo` element per identifier the carrier
//! recognized; unrecognized identifiers come back as `TrackInfo` entries
//! carrying an `Error` child, which this client drops.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::escape::escape;
use reqwest::Method;
use shiptrack_core::CarrierClient;
use shiptrack_domain::constants::{USPS_CHUNK_SIZE, USPS_TRACK_URL};
use shiptrack_domain::{
    Carrier, RawCarrierRecord, Result, ShiptrackError, UspsCredentials, UspsTrackInfo, WorkUnit,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::HttpClient;

/// USPS TrackV2 API client.
pub struct UspsClient {
    base_url: String,
    http_client: HttpClient,
    credentials: UspsCredentials,
}

impl UspsClient {
    /// Create a client against the production shipping API endpoint.
    pub fn new(credentials: UspsCredentials, request_timeout: Duration) -> Result<Self> {
        Self::with_base_url(credentials, request_timeout, USPS_TRACK_URL)
    }

    /// Create a client against a custom endpoint (tests point this at a mock
    /// server).
    pub fn with_base_url(
        credentials: UspsCredentials,
        request_timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(request_timeout).build()?;
        Ok(Self { base_url: base_url.into(), http_client, credentials })
    }

    fn build_request_xml(&self, identifiers: &[String]) -> String {
        let mut xml = String::new();
        let _ = write!(
            xml,
            r#"<TrackFieldRequest USERID="{}">"#,
            escape(self.credentials.user_id.as_str())
        );
        xml.push_str("<Revision>1</Revision>");
        let _ = write!(
            xml,
            "<SourceId>{}</SourceId>",
            escape(self.credentials.source_id.as_str())
        );
        for identifier in identifiers {
            let _ = write!(xml, r#"<TrackID ID="{}"></TrackID>"#, escape(identifier.as_str()));
        }
        xml.push_str("</TrackFieldRequest>");
        xml
    }
}

#[async_trait]
impl CarrierClient for UspsClient {
    fn carrier(&self) -> Carrier {
        Carrier::Usps
    }

    async fn fetch(&self, unit: &WorkUnit) -> Result<Vec<RawCarrierRecord>> {
        if unit.identifiers.is_empty() {
            return Err(ShiptrackError::InvalidInput("empty USPS work unit".into()));
        }
        if unit.identifiers.len() > USPS_CHUNK_SIZE {
            return Err(ShiptrackError::InvalidInput(format!(
                "USPS work unit holds {} identifiers, the API accepts at most {}",
                unit.identifiers.len(),
                USPS_CHUNK_SIZE
            )));
        }

        let xml = self.build_request_xml(&unit.identifiers);
        let request = self
            .http_client
            .request(Method::GET, &self.base_url)
            .query(&[("API", "TrackV2"), ("XML", xml.as_str())]);
        let response = self.http_client.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShiptrackError::Transport(format!(
                "USPS TrackV2 API returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(|err| {
            ShiptrackError::Transport(format!("reading USPS response body failed: {err}"))
        })?;

        let payload: TrackResponseWire = quick_xml::de::from_str(&body).map_err(|err| {
            ShiptrackError::MalformedRecord(format!("USPS response did not parse: {err}"))
        })?;

        // A request-level rejection (bad USERID, malformed XML) comes back
        // with an Error description and no TrackInfo entries at all.
        if payload.track_info.is_empty() {
            if let Some(description) = payload.description {
                return Err(ShiptrackError::CarrierRejected(description));
            }
        }

        let mut records = Vec::with_capacity(payload.track_info.len());
        for info in payload.track_info {
            if let Some(error) = info.error {
                debug!(
                    id = info.id.as_deref().unwrap_or("<missing>"),
                    description = error.description.as_deref().unwrap_or(""),
                    "USPS rejected an identifier inside a bulk response"
                );
                continue;
            }
            let Some(id) = info.id else {
                warn!("dropping a USPS TrackInfo entry without an ID attribute");
                continue;
            };
            records.push(RawCarrierRecord::Usps(UspsTrackInfo {
                id,
                status: info.status,
                status_category: info.status_category,
                status_summary: info.status_summary,
                event_date: info.track_summary.as_ref().and_then(|s| s.event_date.clone()),
                event_time: info.track_summary.as_ref().and_then(|s| s.event_time.clone()),
                event_city: info.track_summary.as_ref().and_then(|s| s.event_city.clone()),
                event_state: info.track_summary.and_then(|s| s.event_state),
            }));
        }

        Ok(records)
    }
}

/* -------------------------------------------------------------------------- */
/* Wire types */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
struct TrackResponseWire {
    #[serde(rename = "TrackInfo", default)]
    track_info: Vec<TrackInfoWire>,
    /// Populated when the root element is a request-level `Error`.
    #[serde(rename = "Description")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackInfoWire {
    #[serde(rename = "@ID")]
    id: Option<String>,
    #[serde(rename = "Status")]
    status: Option<String>,
    #[serde(rename = "StatusCategory")]
    status_category: Option<String>,
    #[serde(rename = "StatusSummary")]
    status_summary: Option<String>,
    #[serde(rename = "TrackSummary")]
    track_summary: Option<TrackSummaryWire>,
    #[serde(rename = "Error")]
    error: Option<TrackErrorWire>,
}

#[derive(Debug, Deserialize)]
struct TrackSummaryWire {
    #[serde(rename = "EventDate")]
    event_date: Option<String>,
    #[serde(rename = "EventTime")]
    event_time: Option<String>,
    #[serde(rename = "EventCity")]
    event_city: Option<String>,
    #[serde(rename = "EventState")]
    event_state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackErrorWire {
    #[serde(rename = "Description")]
    description: Option<String>,
}
