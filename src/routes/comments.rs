// SPDX-License-Identifier: MIT

//! Comment routes. Reading is public; writing requires a signed-in user,
//! and users may only delete their own comments.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Comment;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_COMMENT_LEN: usize = 1000;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/matches/{id}/comments", get(list_comments))
        .route("/api/matches/{id}/comments/count", get(count_comments))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/comments", post(create_comment))
        .route("/api/comments/{id}", delete(delete_comment))
}

#[derive(Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<CommentsResponse>> {
    let comments = state.db.comments_for_match(&match_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

#[derive(Serialize)]
pub struct CommentCountResponse {
    pub count: u64,
}

async fn count_comments(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<String>,
) -> Result<Json<CommentCountResponse>> {
    let count = state.db.comment_count(&match_id).await?;
    Ok(Json(CommentCountResponse { count }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentPayload {
    match_id: String,
    content: String,
}

async fn create_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<Json<Comment>> {
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".to_string()));
    }
    if content.len() > MAX_COMMENT_LEN {
        return Err(AppError::BadRequest(format!(
            "Comment exceeds {} characters",
            MAX_COMMENT_LEN
        )));
    }

    // Display name falls back to the email local part
    let author_name = user
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .map(String::from);

    let comment = state
        .db
        .insert_comment(
            &user.user_id,
            &payload.match_id,
            author_name.as_deref(),
            content,
        )
        .await?;

    Ok(Json(comment))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let comment = state
        .db
        .get_comment(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))?;

    if comment.user_id != user.user_id {
        return Err(AppError::BadRequest(
            "Cannot delete another user's comment".to_string(),
        ));
    }

    state.db.delete_comment(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
