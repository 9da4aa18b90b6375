// SPDX-License-Identifier: MIT

//! Scheduler authentication for `/cron/*` routes.
//!
//! These endpoints are called by the external scheduler, not by users.
//! The scheduler presents a shared secret in `x-cron-secret`.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/// Require the scheduler shared secret on `/cron/*` routes.
pub async fn require_cron_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = request
        .headers()
        .get(CRON_SECRET_HEADER)
        .and_then(|h| h.to_str().ok());

    if presented != Some(state.config.cron_secret.as_str()) {
        tracing::warn!("Blocked cron request with missing or invalid secret");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
