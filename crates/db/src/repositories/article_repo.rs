//! Repository for the `articles` table.
//!
//! Mutations are ownership-scoped: the `WHERE` clause matches both the
//! article id and the caller's user id, so "does not exist" and "belongs to
//! someone else" produce the same result.

use std::collections::HashMap;

use quill_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::article::{Article, ArticleDetail, CreateArticle, UpdateArticle};
use crate::models::comment::CommentDetail;
use crate::repositories::CommentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, perex, content, timestamp, user_id";

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article owned by `user_id`, timestamped now.
    pub async fn create(
        pool: &SqlitePool,
        user_id: DbId,
        input: &CreateArticle,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, perex, content, timestamp, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.perex)
            .bind(&input.content)
            .bind(chrono::Utc::now())
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an article with its comments, votes and scores.
    pub async fn find_detail(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<ArticleDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        let Some(article) = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let comments = CommentRepo::load_details(&mut *tx, Some(id)).await?;
        tx.commit().await?;

        Ok(Some(ArticleDetail { article, comments }))
    }

    /// List every article with nested comments and votes, oldest first.
    ///
    /// There is no pagination.
    pub async fn list_detailed(pool: &SqlitePool) -> Result<Vec<ArticleDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM articles ORDER BY id");
        let articles = sqlx::query_as::<_, Article>(&query)
            .fetch_all(&mut *tx)
            .await?;

        let comments = CommentRepo::load_details(&mut *tx, None).await?;
        tx.commit().await?;

        let mut by_article: HashMap<DbId, Vec<CommentDetail>> = HashMap::new();
        for comment in comments {
            by_article
                .entry(comment.comment.article_id)
                .or_default()
                .push(comment);
        }

        Ok(articles
            .into_iter()
            .map(|article| {
                let comments = by_article.remove(&article.id).unwrap_or_default();
                ArticleDetail { article, comments }
            })
            .collect())
    }

    /// Apply a partial update to an article owned by `user_id`. Only
    /// non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no article with that id is owned by `user_id`; the
    /// stored row is untouched in that case.
    pub async fn update_owned(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($1, title),
                perex = COALESCE($2, perex),
                content = COALESCE($3, content)
             WHERE id = $4 AND user_id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.perex)
            .bind(&input.content)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article owned by `user_id`, cascading to its comments and
    /// their votes.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_owned(
        pool: &SqlitePool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
