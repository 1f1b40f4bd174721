//! Handlers for the `/articles` resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::types::DbId;
use quill_db::models::article::{ArticleDetail, CreateArticle, UpdateArticle};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::AppJson;
use crate::services::articles;
use crate::state::AppState;

/// GET /api/articles
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleDetail>>> {
    let articles = articles::list(&state).await?;
    Ok(Json(articles))
}

/// GET /api/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ArticleDetail>> {
    let article = articles::get(&state, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found."))?;
    Ok(Json(article))
}

/// POST /api/articles
///
/// Responds 201 with a `Location` header pointing at the new article.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    let article = articles::create(&state, &user, &input).await?;
    let location = format!("/api/articles/{}", article.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(article)))
}

/// PUT /api/articles/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateArticle>,
) -> AppResult<StatusCode> {
    match articles::update(&state, &user, id, &input).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::not_found(
            "Article not found or you don't have permission to edit it.",
        )),
    }
}

/// DELETE /api/articles/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if articles::delete(&state, &user, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(
            "Article not found or you don't have permission to delete it.",
        ))
    }
}
