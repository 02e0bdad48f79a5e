//! End-to-end tests for the counter tracking endpoints.

use jobpulse::store::{CounterKind, CounterStore, EntityKind};
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn track_view_increments_and_persists() {
    let store = common::seeded_store();
    let (addr, shutdown) = common::spawn_server(common::test_config(), store.clone()).await;
    let client = common::client();

    // job-1 is seeded with views = 10.
    let res = client
        .post(format!("http://{addr}/track-view"))
        .json(&json!({ "content_type": "job", "content_id": "job-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["views"], json!(11));

    // The new value is visible on a subsequent read.
    let views = store
        .fetch(EntityKind::Job, "job-1", CounterKind::Views)
        .await
        .unwrap();
    assert_eq!(views, 11);

    shutdown.trigger();
}

#[tokio::test]
async fn track_application_feeds_job_stats() {
    let store = common::seeded_store();
    let (addr, shutdown) = common::spawn_server(common::test_config(), store).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/track-application"))
        .json(&json!({ "jobId": "job-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["applicants"], json!(5));

    let res = client
        .get(format!("http://{addr}/job-stats"))
        .query(&[("jobId", "job-1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "applicants": 5 }));

    shutdown.trigger();
}

#[tokio::test]
async fn track_exam_view_counts_participants() {
    let store = common::seeded_store();
    let (addr, shutdown) = common::spawn_server(common::test_config(), store).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/track-exam-view"))
        .json(&json!({ "examId": "exam-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["participants"], json!(3));

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_entity_is_404_and_writes_nothing() {
    let store = common::seeded_store();
    let (addr, shutdown) = common::spawn_server(common::test_config(), store.clone()).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/track-application"))
        .json(&json!({ "jobId": "ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "not found" }));

    assert!(store
        .fetch(EntityKind::Job, "ghost", CounterKind::Applicants)
        .await
        .is_err());

    shutdown.trigger();
}

#[tokio::test]
async fn missing_fields_are_400() {
    let (addr, shutdown) =
        common::spawn_server(common::test_config(), common::seeded_store()).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/track-view"))
        .json(&json!({ "content_type": "job" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], json!("missing field: content_id"));

    let res = client
        .get(format!("http://{addr}/job-stats"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    shutdown.trigger();
}

#[tokio::test]
async fn unsupported_content_type_is_400() {
    let (addr, shutdown) =
        common::spawn_server(common::test_config(), common::seeded_store()).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/track-view"))
        .json(&json!({ "content_type": "company", "content_id": "acme" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);

    shutdown.trigger();
}

#[tokio::test]
async fn health_reports_ok() {
    let (addr, shutdown) =
        common::spawn_server(common::test_config(), common::seeded_store()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!("ok"));

    shutdown.trigger();
}
