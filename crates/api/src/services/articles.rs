//! Article operations.
//!
//! Update and delete are scoped to the caller. "Does not exist" and "owned by
//! someone else" come back as the same `None` / `false`.

use quill_core::article::{validate_article_patch, validate_new_article};
use quill_core::types::DbId;
use quill_db::models::article::{Article, ArticleDetail, CreateArticle, UpdateArticle};
use quill_db::repositories::ArticleRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Every article with its comments, votes and scores.
pub async fn list(state: &AppState) -> AppResult<Vec<ArticleDetail>> {
    tracing::info!("Fetching all articles");
    Ok(ArticleRepo::list_detailed(&state.pool).await?)
}

pub async fn get(state: &AppState, id: DbId) -> AppResult<Option<ArticleDetail>> {
    tracing::info!(article_id = id, "Fetching article");
    Ok(ArticleRepo::find_detail(&state.pool, id).await?)
}

pub async fn create(
    state: &AppState,
    user: &AuthUser,
    input: &CreateArticle,
) -> AppResult<Article> {
    validate_new_article(&input.title, &input.perex)?;

    let article = ArticleRepo::create(&state.pool, user.user_id, input).await?;
    tracing::info!(
        article_id = article.id,
        user_id = user.user_id,
        title = %article.title,
        "Article created"
    );
    Ok(article)
}

pub async fn update(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    input: &UpdateArticle,
) -> AppResult<Option<Article>> {
    validate_article_patch(input.title.as_deref(), input.perex.as_deref())?;

    tracing::info!(article_id = id, user_id = user.user_id, "Updating article");
    let updated = ArticleRepo::update_owned(&state.pool, id, user.user_id, input).await?;
    if updated.is_none() {
        tracing::warn!(
            article_id = id,
            user_id = user.user_id,
            "Article not found or caller is not the owner"
        );
    }
    Ok(updated)
}

pub async fn delete(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<bool> {
    tracing::info!(article_id = id, user_id = user.user_id, "Deleting article");
    let deleted = ArticleRepo::delete_owned(&state.pool, id, user.user_id).await?;
    if !deleted {
        tracing::warn!(
            article_id = id,
            user_id = user.user_id,
            "Article not found or caller is not the owner"
        );
    }
    Ok(deleted)
}
