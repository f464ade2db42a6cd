//! UPS Track API client
//!
//! UPS supports no bulk lookup: one JSON request per inquiry number, with the
//! account credentials repeated in every request body. A response that
//! carries a `Fault` member is a carrier-level rejection of that identifier,
//! not a transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use shiptrack_core::CarrierClient;
use shiptrack_domain::constants::UPS_TRACK_URL;
use shiptrack_domain::{
    Carrier, RawCarrierRecord, Result, ShiptrackError, UpsActivity, UpsCredentials, UpsPackage,
    UpsShipment, WorkUnit,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OneOrMany;
use crate::http::HttpClient;

/// UPS Track API client.
pub struct UpsClient {
    base_url: String,
    http_client: HttpClient,
    credentials: UpsCredentials,
}

impl UpsClient {
    /// Create a client against the production Track endpoint.
    pub fn new(credentials: UpsCredentials, request_timeout: Duration) -> Result<Self> {
        Self::with_base_url(credentials, request_timeout, UPS_TRACK_URL)
    }

    /// Create a client against a custom endpoint (tests point this at a mock
    /// server).
    pub fn with_base_url(
        credentials: UpsCredentials,
        request_timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(request_timeout).build()?;
        Ok(Self { base_url: base_url.into(), http_client, credentials })
    }

    fn build_request(&self, inquiry_number: &str) -> TrackRequestWire {
        TrackRequestWire {
            security: SecurityWire {
                username_token: UsernameTokenWire {
                    username: self.credentials.username.clone(),
                    password: self.credentials.password.clone(),
                },
                service_access_token: ServiceAccessTokenWire {
                    access_license_number: self.credentials.license.clone(),
                },
            },
            track_request: TrackRequestBodyWire {
                request: RequestOptionsWire {
                    request_action: "Track".to_string(),
                    request_option: "activity".to_string(),
                },
                inquiry_number: inquiry_number.to_string(),
            },
        }
    }
}

#[async_trait]
impl CarrierClient for UpsClient {
    fn carrier(&self) -> Carrier {
        Carrier::Ups
    }

    async fn fetch(&self, unit: &WorkUnit) -> Result<Vec<RawCarrierRecord>> {
        let inquiry_number = unit
            .identifiers
            .first()
            .ok_or_else(|| ShiptrackError::InvalidInput("empty UPS work unit".into()))?;

        let body = self.build_request(inquiry_number);
        let request = self
            .http_client
            .request(Method::POST, &self.base_url)
            .json(&body);
        let response = self.http_client.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShiptrackError::Transport(format!(
                "UPS Track API returned HTTP {status}"
            )));
        }

        let payload: TrackResponseWire = response.json().await.map_err(|err| {
            ShiptrackError::MalformedRecord(format!(
                "UPS response for {inquiry_number} did not parse: {err}"
            ))
        })?;

        if let Some(fault) = payload.fault {
            debug!(inquiry_number, fault = %fault, "UPS faulted the lookup");
            return Err(ShiptrackError::CarrierRejected(inquiry_number.clone()));
        }

        let track_response = payload.track_response.ok_or_else(|| {
            ShiptrackError::MalformedRecord(format!(
                "UPS response for {inquiry_number} carries neither Fault nor TrackResponse"
            ))
        })?;

        Ok(vec![RawCarrierRecord::Ups(track_response.shipment.into_record())])
    }
}

/* -------------------------------------------------------------------------- */
/* Wire types */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Serialize)]
struct TrackRequestWire {
    #[serde(rename = "Security")]
    security: SecurityWire,
    #[serde(rename = "TrackRequest")]
    track_request: TrackRequestBodyWire,
}

#[derive(Debug, Serialize)]
struct SecurityWire {
    #[serde(rename = "UsernameToken")]
    username_token: UsernameTokenWire,
    #[serde(rename = "UPSServiceAccessToken")]
    service_access_token: ServiceAccessTokenWire,
}

#[derive(Debug, Serialize)]
struct UsernameTokenWire {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Password")]
    password: String,
}

#[derive(Debug, Serialize)]
struct ServiceAccessTokenWire {
    #[serde(rename = "AccessLicenseNumber")]
    access_license_number: String,
}

#[derive(Debug, Serialize)]
struct TrackRequestBodyWire {
    #[serde(rename = "Request")]
    request: RequestOptionsWire,
    #[serde(rename = "InquiryNumber")]
    inquiry_number: String,
}

#[derive(Debug, Serialize)]
struct RequestOptionsWire {
    #[serde(rename = "RequestAction")]
    request_action: String,
    #[serde(rename = "RequestOption")]
    request_option: String,
}

#[derive(Debug, Deserialize)]
struct TrackResponseWire {
    #[serde(rename = "Fault")]
    fault: Option<serde_json::Value>,
    #[serde(rename = "TrackResponse")]
    track_response: Option<TrackResponseBodyWire>,
}

#[derive(Debug, Deserialize)]
struct TrackResponseBodyWire {
    #[serde(rename = "Shipment")]
    shipment: ShipmentWire,
}

#[derive(Debug, Deserialize)]
struct ShipmentWire {
    #[serde(rename = "InquiryNumber")]
    inquiry_number: InquiryNumberWire,
    #[serde(rename = "Package")]
    package: OneOrMany<PackageWire>,
}

impl ShipmentWire {
    fn into_record(self) -> UpsShipment {
        UpsShipment {
            inquiry_number: self.inquiry_number.value,
            packages: self.package.into_vec().into_iter().map(PackageWire::into_record).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InquiryNumberWire {
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct PackageWire {
    #[serde(rename = "TrackingNumber")]
    tracking_number: Option<String>,
    #[serde(rename = "Activity")]
    activity: Option<OneOrMany<ActivityWire>>,
}

impl PackageWire {
    fn into_record(self) -> UpsPackage {
        UpsPackage {
            tracking_number: self.tracking_number,
            activity: self
                .activity
                .map(|a| a.into_vec().into_iter().map(ActivityWire::into_record).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActivityWire {
    #[serde(rename = "Status")]
    status: Option<StatusWire>,
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Time")]
    time: Option<String>,
    #[serde(rename = "ActivityLocation")]
    location: Option<ActivityLocationWire>,
}

impl ActivityWire {
    fn into_record(self) -> UpsActivity {
        let (status_code, description) = match self.status {
            Some(status) => (status.status_type, status.description),
            None => (None, None),
        };
        let address = self.location.and_then(|l| l.address);
        let (city, state) = match address {
            Some(address) => (address.city, address.state),
            None => (None, None),
        };
        UpsActivity { status_code, description, date: self.date, time: self.time, city, state }
    }
}

#[derive(Debug, Deserialize)]
struct StatusWire {
    #[serde(rename = "Type")]
    status_type: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActivityLocationWire {
    #[serde(rename = "Address")]
    address: Option<AddressWire>,
}

#[derive(Debug, Deserialize)]
struct AddressWire {
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "StateProvinceCode")]
    state: Option<String>,
}
