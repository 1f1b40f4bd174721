//! Repository for the `comments` table.
//!
//! Comments are append-only: there is no update or delete here. They are
//! removed only by cascade when their article is deleted.

use std::collections::HashMap;

use quill_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::comment::{Comment, CommentDetail, CreateComment};
use crate::models::vote::Vote;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content, timestamp, article_id, user_id";

/// Vote columns, qualified for use in joins.
const VOTE_COLUMNS: &str = "v.id, v.value, v.ip_address, v.comment_id";

/// Provides comment creation and reads.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment to an article, timestamped now.
    ///
    /// The parent check happens inside the insert statement, so a missing
    /// article yields `None` instead of a foreign-key error.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (content, timestamp, article_id, user_id)
             SELECT $1, $2, $3, $4
             WHERE EXISTS (SELECT 1 FROM articles WHERE id = $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(&input.content)
            .bind(chrono::Utc::now())
            .bind(input.article_id)
            .bind(input.user_id)
            .bind(input.article_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment with its votes and score.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CommentDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let detail = Self::load_detail(&mut tx, id).await?;
        tx.commit().await?;
        Ok(detail)
    }

    /// Load one comment with its votes on the caller's connection.
    pub(crate) async fn load_detail(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<CommentDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        let Some(comment) = sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let query =
            format!("SELECT {VOTE_COLUMNS} FROM votes v WHERE v.comment_id = $1 ORDER BY v.id");
        let votes = sqlx::query_as::<_, Vote>(&query)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(Some(CommentDetail::new(comment, votes)))
    }

    /// Load comment details (with votes) for one article, or for every
    /// article when `article_id` is `None`, ordered by comment id.
    ///
    /// Runs on the caller's connection so article and comment reads can share
    /// one snapshot.
    pub(crate) async fn load_details(
        conn: &mut SqliteConnection,
        article_id: Option<DbId>,
    ) -> Result<Vec<CommentDetail>, sqlx::Error> {
        let (comments, votes) = match article_id {
            Some(article_id) => {
                let query =
                    format!("SELECT {COLUMNS} FROM comments WHERE article_id = $1 ORDER BY id");
                let comments = sqlx::query_as::<_, Comment>(&query)
                    .bind(article_id)
                    .fetch_all(&mut *conn)
                    .await?;

                let query = format!(
                    "SELECT {VOTE_COLUMNS} FROM votes v
                     JOIN comments c ON c.id = v.comment_id
                     WHERE c.article_id = $1
                     ORDER BY v.id"
                );
                let votes = sqlx::query_as::<_, Vote>(&query)
                    .bind(article_id)
                    .fetch_all(&mut *conn)
                    .await?;
                (comments, votes)
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM comments ORDER BY id");
                let comments = sqlx::query_as::<_, Comment>(&query)
                    .fetch_all(&mut *conn)
                    .await?;

                let query = format!("SELECT {VOTE_COLUMNS} FROM votes v ORDER BY v.id");
                let votes = sqlx::query_as::<_, Vote>(&query)
                    .fetch_all(&mut *conn)
                    .await?;
                (comments, votes)
            }
        };

        Ok(attach_votes(comments, votes))
    }
}

/// Group votes under their comments and compute scores.
fn attach_votes(comments: Vec<Comment>, votes: Vec<Vote>) -> Vec<CommentDetail> {
    let mut by_comment: HashMap<DbId, Vec<Vote>> = HashMap::new();
    for vote in votes {
        by_comment.entry(vote.comment_id).or_default().push(vote);
    }

    comments
        .into_iter()
        .map(|comment| {
            let votes = by_comment.remove(&comment.id).unwrap_or_default();
            CommentDetail::new(comment, votes)
        })
        .collect()
}
