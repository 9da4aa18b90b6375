// SPDX-License-Identifier: MIT

//! Dispatch invocation surface tests.
//!
//! The /cron/send-reminders endpoint is scheduler-only: it must reject
//! requests without the shared secret, and report job-level failures as
//! 500 with `{success:false, error}`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;

const CRON_PATH: &str = "/cron/send-reminders";

fn cron_request(secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(CRON_PATH);
    if let Some(secret) = secret {
        builder = builder.header("x-cron-secret", secret);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_cron_without_secret_forbidden() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(cron_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cron_with_wrong_secret_forbidden() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(cron_request(Some("nope"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cron_store_failure_reports_job_error() {
    // Valid secret, but the offline mock database fails the due-reminders
    // query: a job-level failure, so no report is produced.
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(cron_request(Some(&state.config.cron_secret)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_cron_without_email_provider_reports_job_error() {
    let (app, state) = common::create_test_app_without_email();

    let response = app
        .oneshot(cron_request(Some(&state.config.cron_secret)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_cron_rejects_get() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(CRON_PATH)
                .header("x-cron-secret", &state.config.cron_secret)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
