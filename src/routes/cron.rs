// SPDX-License-Identifier: MIT

//! Scheduler-triggered routes.
//!
//! `/cron/send-reminders` runs one reminder dispatch invocation. The route
//! is guarded by `require_cron_auth` in routes/mod.rs; nothing here should
//! be reachable by end users.

use crate::error::AppError;
use crate::services::dispatch::DispatchOutcome;
use crate::services::ReminderDispatcher;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Cron routes (called by the external scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/cron/send-reminders", post(send_reminders))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CronResponse {
    success: bool,
    message: String,
    success_count: usize,
    failed_count: usize,
    results: Vec<DispatchOutcome>,
}

#[derive(Serialize)]
struct CronErrorResponse {
    success: bool,
    error: String,
}

/// Run one reminder dispatch invocation.
///
/// 200 with a per-item report on normal completion; 500 with
/// `{success:false, error}` when the job itself fails (missing credential,
/// store query error, directory error) before any send happens.
async fn send_reminders(State(state): State<Arc<AppState>>) -> Response {
    let mailer = match &state.email {
        Some(mailer) => mailer.clone(),
        None => return job_error(AppError::Config("RESEND_API_KEY")),
    };

    let dispatcher = ReminderDispatcher::new(state.db.clone(), state.db.clone(), mailer);

    match dispatcher.run().await {
        Ok(report) => Json(CronResponse {
            success: true,
            message: report.message,
            success_count: report.success_count,
            failed_count: report.failed_count,
            results: report.results,
        })
        .into_response(),
        Err(e) => job_error(e),
    }
}

fn job_error(e: AppError) -> Response {
    tracing::error!(error = %e, "Reminder dispatch failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CronErrorResponse {
            success: false,
            error: e.to_string(),
        }),
    )
        .into_response()
}
