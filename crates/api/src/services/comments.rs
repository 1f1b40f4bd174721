//! Comment operations.

use quill_core::comment::validate_comment_content;
use quill_core::types::DbId;
use quill_db::models::comment::{CommentDetail, CreateComment};
use quill_db::repositories::CommentRepo;
use quill_events::BlogEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Append a comment to an article and notify subscribers of that article.
///
/// A missing article is a not-found error, never a constraint failure.
pub async fn add(
    state: &AppState,
    user: &AuthUser,
    article_id: DbId,
    content: String,
) -> AppResult<CommentDetail> {
    validate_comment_content(&content)?;

    tracing::info!(article_id, user_id = user.user_id, "Adding comment");
    let input = CreateComment {
        article_id,
        content,
        user_id: user.user_id,
    };
    let comment = CommentRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found."))?;

    let detail = CommentDetail::new(comment, Vec::new());
    state.event_bus.publish(BlogEvent::comment_added(detail.clone()));
    Ok(detail)
}

pub async fn get(state: &AppState, id: DbId) -> AppResult<Option<CommentDetail>> {
    tracing::info!(comment_id = id, "Fetching comment");
    Ok(CommentRepo::find_detail(&state.pool, id).await?)
}
