//! Handlers for the `/comments` resource.
//!
//! Comment and vote bodies are bare JSON values: a string for the comment
//! text and an integer for the vote.

use axum::extract::{Path, State};
use axum::Json;
use quill_core::types::DbId;
use quill_db::models::comment::CommentDetail;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::AppJson;
use crate::middleware::voter::Voter;
use crate::services::{comments, votes};
use crate::state::AppState;

/// POST /api/comments/{article_id}
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path(article_id): Path<DbId>,
    AppJson(content): AppJson<String>,
) -> AppResult<Json<CommentDetail>> {
    let comment = comments::add(&state, &user, article_id, content).await?;
    Ok(Json(comment))
}

/// GET /api/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CommentDetail>> {
    let comment = comments::get(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found."))?;
    Ok(Json(comment))
}

/// POST /api/comments/{comment_id}/vote
pub async fn vote(
    State(state): State<AppState>,
    Voter(voter): Voter,
    Path(comment_id): Path<DbId>,
    AppJson(value): AppJson<i64>,
) -> AppResult<Json<CommentDetail>> {
    let comment = votes::cast(&state, comment_id, value, &voter)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found."))?;
    Ok(Json(comment))
}
