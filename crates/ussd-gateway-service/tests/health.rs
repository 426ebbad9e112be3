//! Health check integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_reports_service_and_version() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "USSD App");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["sms_configured"], false);
}

#[tokio::test]
async fn health_reports_configured_sms() {
    let (harness, _sent) = TestHarness::with_recording_sms();

    let response = harness.server.get("/health").await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["sms_configured"], true);
}
