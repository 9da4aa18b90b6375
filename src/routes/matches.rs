// SPDX-License-Identifier: MIT

//! Match listing routes.

use crate::error::Result;
use crate::models::{Gender, League, Match, MatchStatus};
use crate::services::matches::upcoming_within_week;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/matches", get(get_matches))
}

#[derive(Deserialize)]
struct MatchesQuery {
    league: Option<League>,
    gender: Option<Gender>,
    status: Option<MatchStatus>,
    /// Restrict to upcoming matches within the next week
    #[serde(default)]
    upcoming: bool,
}

#[derive(Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
}

/// Merged match list from both leagues, newest first, with optional filters.
async fn get_matches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MatchesQuery>,
) -> Result<Json<MatchesResponse>> {
    let mut matches = state.catalog.all_matches().await?;

    if query.upcoming {
        matches = upcoming_within_week(&matches, chrono::Utc::now());
    }
    if let Some(league) = query.league {
        matches.retain(|m| m.league == league);
    }
    if let Some(gender) = query.gender {
        matches.retain(|m| m.gender == gender);
    }
    if let Some(status) = query.status {
        matches.retain(|m| m.status == status);
    }

    Ok(Json(MatchesResponse { matches }))
}
