// SPDX-License-Identifier: MIT

//! Video search routes.

use crate::error::{AppError, Result};
use crate::services::youtube::{Video, YoutubeClient};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_RESULTS_CAP: u32 = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/videos/highlights", get(get_highlights))
        .route("/api/videos/team", get(get_team_videos))
        .route("/api/videos/search", get(search_videos))
}

#[derive(Serialize)]
pub struct VideosResponse {
    pub videos: Vec<Video>,
}

fn client(state: &AppState) -> Result<&YoutubeClient> {
    state
        .youtube
        .as_ref()
        .ok_or(AppError::Config("YOUTUBE_API_KEY"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighlightsQuery {
    max_results: Option<u32>,
}

async fn get_highlights(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HighlightsQuery>,
) -> Result<Json<VideosResponse>> {
    let max = query.max_results.unwrap_or(6).min(MAX_RESULTS_CAP);
    let videos = client(&state)?.highlight_videos(max).await?;
    Ok(Json(VideosResponse { videos }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamVideosQuery {
    name: String,
    max_results: Option<u32>,
}

async fn get_team_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeamVideosQuery>,
) -> Result<Json<VideosResponse>> {
    if query.name.trim().is_empty() {
        return Err(AppError::BadRequest("Team name is required".to_string()));
    }
    let max = query.max_results.unwrap_or(6).min(MAX_RESULTS_CAP);
    let videos = client(&state)?.team_videos(query.name.trim(), max).await?;
    Ok(Json(VideosResponse { videos }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    q: String,
    max_results: Option<u32>,
}

async fn search_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<VideosResponse>> {
    if query.q.trim().is_empty() {
        return Err(AppError::BadRequest("Search query is required".to_string()));
    }
    let max = query.max_results.unwrap_or(9).min(MAX_RESULTS_CAP);
    let videos = client(&state)?.search_videos(query.q.trim(), max).await?;
    Ok(Json(VideosResponse { videos }))
}
