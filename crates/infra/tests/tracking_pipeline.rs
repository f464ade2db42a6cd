//! End-to-end pipeline tests: real carrier clients against mock HTTP servers,
//! driven through the tracking service.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use shiptrack_core::TrackingService;
use shiptrack_domain::{
    Carrier, RawCarrierRecord, TrackOutput, TrackingStatus, UpsCredentials, UspsCredentials,
};
use shiptrack_infra::{UpsClient, UspsClient};
use wiremock::matchers::{body_string_contains, method, query_param_contains};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ups_service(base_url: String) -> TrackingService {
    init_tracing();
    let credentials = UpsCredentials {
        username: "ups-user".to_string(),
        password: "ups-pass".to_string(),
        license: "ups-license".to_string(),
    };
    let client = UpsClient::with_base_url(credentials, Duration::from_secs(5), base_url)
        .expect("ups client");
    TrackingService::new().with_client(Arc::new(client))
}

fn usps_service(base_url: String) -> TrackingService {
    init_tracing();
    let credentials = UspsCredentials {
        user_id: "usps-user".to_string(),
        source_id: "usps-source".to_string(),
    };
    let client = UspsClient::with_base_url(credentials, Duration::from_secs(5), base_url)
        .expect("usps client");
    TrackingService::new().with_client(Arc::new(client))
}

fn ups_delivered_body(inquiry: &str) -> serde_json::Value {
    json!({
        "TrackResponse": {
            "Shipment": {
                "InquiryNumber": { "Value": inquiry },
                "Package": {
                    "Activity": {
                        "Status": { "Type": "D", "Description": "Delivered" },
                        "Date": "20210505",
                        "Time": "133600",
                        "ActivityLocation": {
                            "Address": { "City": "Portland", "StateProvinceCode": "OR" }
                        }
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn ups_batch_reports_faulted_identifier_alongside_successes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("1Z001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ups_delivered_body("1Z001")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("1Z002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Fault": { "faultcode": "Client", "faultstring": "Invalid tracking number" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["1Z001".to_string(), "1Z002".to_string()];
    let report = ups_service(server.uri()).track(Carrier::Ups, &ids, true).await.expect("report");

    let results = match report.output {
        TrackOutput::Simplified(results) => results,
        TrackOutput::Raw(_) => panic!("expected simplified output"),
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tracking_number, "1Z001");
    assert_eq!(results[0].status, TrackingStatus::Delivered);
    assert_eq!(results[0].checkpoint.location.as_deref(), Some("PORTLAND, OR, US"));
    assert_eq!(
        results[0].checkpoint.timestamp,
        NaiveDate::from_ymd_opt(2021, 5, 5).and_then(|d| d.and_hms_opt(13, 36, 0))
    );

    assert_eq!(report.failed_identifiers, vec!["1Z002".to_string()]);
    assert!((report.failure_rate - 0.5).abs() < f64::EPSILON);
    assert!(report.warning.is_some(), "half the batch failing must warn");
}

#[tokio::test]
async fn ups_raw_mode_returns_carrier_vocabulary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ups_delivered_body("1Z003")))
        .mount(&server)
        .await;

    let ids = vec!["1Z003".to_string()];
    let report = ups_service(server.uri()).track(Carrier::Ups, &ids, false).await.expect("report");

    match report.output {
        TrackOutput::Raw(records) => {
            assert_eq!(records.len(), 1);
            match &records[0] {
                RawCarrierRecord::Ups(shipment) => {
                    assert_eq!(shipment.inquiry_number, "1Z003");
                    let activity =
                        shipment.packages[0].latest_activity().expect("activity present");
                    assert_eq!(activity.status_code.as_deref(), Some("D"));
                }
                RawCarrierRecord::Usps(_) => panic!("expected a UPS record"),
            }
        }
        TrackOutput::Simplified(_) => panic!("expected raw output"),
    }
    assert!(report.failed_identifiers.is_empty());
}

#[tokio::test]
async fn usps_failed_chunk_does_not_take_down_the_batch() {
    let server = MockServer::start().await;

    // 12 identifiers split into a chunk of ten and a chunk of two; the
    // second chunk's request fails at the transport level.
    let ids: Vec<String> = (1..=12).map(|n| format!("9400A{n:02}")).collect();

    let mut first_chunk_body = String::from("<TrackResponse>");
    for id in &ids[..10] {
        first_chunk_body.push_str(&format!(
            r#"<TrackInfo ID="{id}">
  <TrackSummary>
    <EventTime>1:36 pm</EventTime>
    <EventDate>May 5, 2021</EventDate>
    <EventCity>Portland</EventCity>
    <EventState>OR</EventState>
  </TrackSummary>
  <Status>Delivered, In/At Mailbox</Status>
  <StatusCategory>Delivered</StatusCategory>
  <StatusSummary>Your item was delivered.</StatusSummary>
</TrackInfo>"#
        ));
    }
    first_chunk_body.push_str("</TrackResponse>");

    Mock::given(method("GET"))
        .and(query_param_contains("XML", "9400A11"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param_contains("XML", "9400A01"))
        .respond_with(ResponseTemplate::new(200).set_body_string(first_chunk_body))
        .expect(1)
        .mount(&server)
        .await;

    let report =
        usps_service(server.uri()).track(Carrier::Usps, &ids, true).await.expect("report");

    let results = match report.output {
        TrackOutput::Simplified(results) => results,
        TrackOutput::Raw(_) => panic!("expected simplified output"),
    };
    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r.status == TrackingStatus::Delivered));
    assert_eq!(
        results[0].checkpoint.message.as_deref(),
        Some("Delivered, In/At Mailbox - Your item was delivered.")
    );

    assert_eq!(
        report.failed_identifiers,
        vec!["9400A11".to_string(), "9400A12".to_string()]
    );
    assert!((report.failure_rate - 2.0 / 12.0).abs() < 1e-9);
    assert!(report.warning.is_some());
}

#[tokio::test]
async fn usps_dropped_record_is_booked_as_failed() {
    let server = MockServer::start().await;

    // The carrier answers the chunk but only covers one of two identifiers.
    let body = r#"<TrackResponse>
  <TrackInfo ID="9400OK">
    <Status>In Transit to Next Facility</Status>
    <StatusCategory>In Transit</StatusCategory>
  </TrackInfo>
  <TrackInfo ID="9400MISSING">
    <Error>
      <Description>A status update is not yet available.</Description>
    </Error>
  </TrackInfo>
</TrackResponse>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["9400OK".to_string(), "9400MISSING".to_string()];
    let report =
        usps_service(server.uri()).track(Carrier::Usps, &ids, true).await.expect("report");

    assert_eq!(report.len(), 1);
    assert_eq!(report.failed_identifiers, vec!["9400MISSING".to_string()]);
}
