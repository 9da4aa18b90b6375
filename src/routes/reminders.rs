// SPDX-License-Identifier: MIT

//! Email reminder routes (authenticated).
//!
//! Creating a reminder computes `remind_at` from the match's scheduled start
//! minus a lead time. A user can hold at most one active (unsent) reminder
//! per match; sent reminders are history and never block a new one.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{MatchSnapshot, Reminder};
use crate::time_utils::match_start_utc;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default lead time before the match starts.
const DEFAULT_MINUTES_BEFORE: i64 = 60;
/// A day of lead time is the most the UI offers.
const MAX_MINUTES_BEFORE: i64 = 24 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reminders", post(create_reminder))
        .route(
            "/api/reminders/{match_id}",
            get(reminder_status).delete(cancel_reminder),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReminderPayload {
    match_id: String,
    match_data: MatchSnapshot,
    minutes_before: Option<i64>,
}

#[derive(Serialize)]
pub struct ReminderResponse {
    pub success: bool,
    pub reminder: Reminder,
}

async fn create_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateReminderPayload>,
) -> Result<Json<ReminderResponse>> {
    let minutes_before = payload.minutes_before.unwrap_or(DEFAULT_MINUTES_BEFORE);
    if !(1..=MAX_MINUTES_BEFORE).contains(&minutes_before) {
        return Err(AppError::BadRequest(format!(
            "minutesBefore must be between 1 and {}",
            MAX_MINUTES_BEFORE
        )));
    }

    let time = payload
        .match_data
        .time
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Match has no scheduled time".to_string()))?;
    let start = match_start_utc(&payload.match_data.date, time).ok_or_else(|| {
        AppError::BadRequest("Invalid match date or time in matchData".to_string())
    })?;

    if start <= chrono::Utc::now() {
        return Err(AppError::BadRequest(
            "Match has already started".to_string(),
        ));
    }

    if state
        .db
        .find_unsent_reminder(&user.user_id, &payload.match_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "A reminder is already set for this match".to_string(),
        ));
    }

    let remind_at = start - chrono::Duration::minutes(minutes_before);
    let reminder = state
        .db
        .insert_reminder(
            &user.user_id,
            &payload.match_id,
            &payload.match_data,
            remind_at,
        )
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        match_id = %payload.match_id,
        remind_at = %remind_at,
        "Reminder created"
    );

    Ok(Json(ReminderResponse {
        success: true,
        reminder,
    }))
}

#[derive(Serialize)]
pub struct ReminderStatusResponse {
    /// True if the user holds an unsent reminder for this match
    pub active: bool,
}

async fn reminder_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<ReminderStatusResponse>> {
    let active = state
        .db
        .find_unsent_reminder(&user.user_id, &match_id)
        .await?
        .is_some();
    Ok(Json(ReminderStatusResponse { active }))
}

#[derive(Serialize)]
pub struct CancelReminderResponse {
    pub success: bool,
}

async fn cancel_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<CancelReminderResponse>> {
    state
        .db
        .delete_unsent_reminder(&user.user_id, &match_id)
        .await?;
    Ok(Json(CancelReminderResponse { success: true }))
}
