// SPDX-License-Identifier: MIT

//! Request validation tests for authenticated write endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

mod common;

const TEST_USER: &str = "8f9c2f41-0000-0000-0000-000000000001";

fn create_test_jwt(signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: Option<String>,
        exp: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    encode(
        &Header::new(Algorithm::HS256),
        &Claims {
            sub: TEST_USER.to_string(),
            email: Some("fan@example.com".to_string()),
            exp: now + 86400,
        },
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

fn post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn match_data(date: &str, time: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "homeTeam": "Taipei Kings",
        "awayTeam": "Taoyuan Pilots",
        "date": date,
        "time": time,
        "location": "Taipei Arena",
        "league": "TPVL",
        "gender": "male",
        "url": null,
    })
}

#[tokio::test]
async fn test_reminder_requires_scheduled_time() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(post_json(
            "/api/reminders",
            &token,
            serde_json::json!({
                "matchId": "tpvl_1",
                "matchData": match_data("2099-01-01", None),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reminder_rejects_invalid_date() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(post_json(
            "/api/reminders",
            &token,
            serde_json::json!({
                "matchId": "tpvl_1",
                "matchData": match_data("someday", Some("19:00")),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reminder_rejects_started_match() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(post_json(
            "/api/reminders",
            &token,
            serde_json::json!({
                "matchId": "tpvl_1",
                "matchData": match_data("2020-01-01", Some("19:00")),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reminder_rejects_out_of_range_lead_time() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(post_json(
            "/api/reminders",
            &token,
            serde_json::json!({
                "matchId": "tpvl_1",
                "matchData": match_data("2099-01-01", Some("19:00")),
                "minutesBefore": 0,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_comment_rejected() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(post_json(
            "/api/comments",
            &token,
            serde_json::json!({ "matchId": "tpvl_1", "content": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorite_requires_body() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt(&state.config.supabase_jwt_secret);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/favorites")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Missing matchId/matchData fails JSON extraction
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
