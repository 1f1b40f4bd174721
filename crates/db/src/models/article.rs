//! Article entity model and DTOs.

use quill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::comment::CommentDetail;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub perex: String,
    pub content: String,
    pub timestamp: Timestamp,
    pub user_id: DbId,
}

/// DTO for creating an article. The owner comes from the caller's identity,
/// never from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub perex: String,
    pub content: String,
}

/// DTO for a partial article update. `None` (absent or `null`) keeps the
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub perex: Option<String>,
    pub content: Option<String>,
}

/// An article with its comments, each carrying votes and score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub comments: Vec<CommentDetail>,
}
