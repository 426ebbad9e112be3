//! Callback log listing integration tests.

mod common;

use common::{TestHarness, PHONE};

#[tokio::test]
async fn empty_log() {
    let harness = TestHarness::new();

    let response = harness.server.get("/ussd/callback-logs").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["callback_logs"].as_array().unwrap().len(), 0);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn lists_newest_first_with_pagination() {
    let harness = TestHarness::new();
    for _ in 0..3 {
        harness.ussd(PHONE, "3").await;
    }

    let response = harness
        .server
        .get("/ussd/callback-logs")
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let logs = body["callback_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["id"], 3);
    assert_eq!(logs[1]["id"], 2);
    assert_eq!(logs[0]["phone_number"], PHONE);
    assert_eq!(logs[0]["session_id"], "ATUid_test");
    assert_eq!(body["has_more"], true);

    let response = harness
        .server
        .get("/ussd/callback-logs")
        .add_query_param("limit", 2)
        .add_query_param("offset", 2)
        .await;

    let body: serde_json::Value = response.json();
    let logs = body["callback_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["id"], 1);
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn other_menu_steps_are_not_logged() {
    let harness = TestHarness::new();
    harness.ussd(PHONE, "").await;
    harness.ussd(PHONE, "2").await;

    let response = harness.server.get("/ussd/callback-logs").await;

    let body: serde_json::Value = response.json();
    assert!(body["callback_logs"].as_array().unwrap().is_empty());
}
