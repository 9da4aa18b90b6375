// SPDX-License-Identifier: MIT

//! Favorite routes (authenticated).

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Favorite, MatchSnapshot};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/{match_id}", delete(remove_favorite))
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FavoritesResponse>> {
    let favorites = state.db.favorites_for_user(&user.user_id).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoritePayload {
    match_id: String,
    match_data: MatchSnapshot,
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub favorite: Favorite,
}

/// Add a favorite. Re-favoriting the same match is a no-op returning the
/// existing row.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AddFavoritePayload>,
) -> Result<Json<FavoriteResponse>> {
    if let Some(existing) = state
        .db
        .find_favorite(&user.user_id, &payload.match_id)
        .await?
    {
        return Ok(Json(FavoriteResponse {
            success: true,
            favorite: existing,
        }));
    }

    let favorite = state
        .db
        .insert_favorite(&user.user_id, &payload.match_id, &payload.match_data)
        .await?;

    Ok(Json(FavoriteResponse {
        success: true,
        favorite,
    }))
}

#[derive(Serialize)]
pub struct RemoveFavoriteResponse {
    pub success: bool,
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(match_id): Path<String>,
) -> Result<Json<RemoveFavoriteResponse>> {
    state.db.delete_favorite(&user.user_id, &match_id).await?;
    Ok(Json(RemoveFavoriteResponse { success: true }))
}
