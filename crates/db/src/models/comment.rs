//! Comment entity model and DTOs.

use quill_core::types::{DbId, Timestamp};
use quill_core::vote;
use serde::Serialize;
use sqlx::FromRow;

use super::vote::Vote;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    pub timestamp: Timestamp,
    pub article_id: DbId,
    pub user_id: DbId,
}

/// DTO for appending a comment to an article.
#[derive(Debug)]
pub struct CreateComment {
    pub article_id: DbId,
    pub content: String,
    pub user_id: DbId,
}

/// A comment with its full vote set and the score derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub votes: Vec<Vote>,
    pub score: i64,
}

impl CommentDetail {
    /// Attach votes to a comment, computing the score from them.
    pub fn new(comment: Comment, votes: Vec<Vote>) -> Self {
        let score = vote::score(votes.iter().map(|v| v.value));
        Self {
            comment,
            votes,
            score,
        }
    }
}
