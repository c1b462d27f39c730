//! `POST /docker-state` contract.

use std::sync::Arc;

use axum::http::StatusCode;
use chaos_harness::container::ContainerAction;
use chaos_harness::http::docker::ContainerStateResponse;
use serde_json::json;

mod common;

use common::{client, spawn_harness, test_config, FakeExecutor, TestHarness};

async fn harness_with(executor: Arc<FakeExecutor>) -> TestHarness {
    spawn_harness(
        test_config("http://127.0.0.1:9/log"),
        "healthy=true\nmanual_config=valid",
        executor,
    )
    .await
}

async fn post_state(harness: &TestHarness, body: serde_json::Value) -> (StatusCode, ContainerStateResponse) {
    let res = client()
        .post(harness.url("/docker-state"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_unknown_container_is_404() {
    let executor = Arc::new(FakeExecutor::default());
    let harness = harness_with(executor.clone()).await;

    let (status, body) = post_state(&harness, json!({"container": "worker9", "state": "start"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.success);
    assert!(body.message.contains("worker9"));
    assert!(executor.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_state_is_400() {
    let executor = Arc::new(FakeExecutor::default());
    let harness = harness_with(executor.clone()).await;

    let (status, body) = post_state(&harness, json!({"container": "worker1", "state": "pause"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.message, "state only support [ start | stop | restart ]");
    assert!(executor.executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let harness = harness_with(Arc::new(FakeExecutor::default())).await;

    let (status, _) = post_state(&harness, json!({"state": "start"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_valid_request_runs_once() {
    let executor = Arc::new(FakeExecutor::default());
    let harness = harness_with(executor.clone()).await;

    let (status, body) = post_state(&harness, json!({"container": "worker2", "state": "restart"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.success);
    assert_eq!(body.message, "set container worker2 to restart success");

    let executed = executor.executed.lock().unwrap();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].container, "worker2");
    assert_eq!(executed[0].action, ContainerAction::Restart);
}

#[tokio::test]
async fn test_remote_failure_is_500() {
    let executor = Arc::new(FakeExecutor {
        fail: true,
        ..FakeExecutor::default()
    });
    let harness = harness_with(executor).await;

    let (status, body) = post_state(&harness, json!({"container": "worker3", "state": "stop"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    assert_eq!(body.message, "Internal Server Error");
}

#[tokio::test]
async fn test_disabled_endpoint_is_not_routed() {
    let mut config = test_config("http://127.0.0.1:9/log");
    config.containers.enabled = false;
    let harness = spawn_harness(
        config,
        "healthy=true\nmanual_config=valid",
        Arc::new(FakeExecutor::default()),
    )
    .await;

    let res = client()
        .post(harness.url("/docker-state"))
        .json(&json!({"container": "worker1", "state": "start"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
