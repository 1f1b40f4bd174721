//! Demo data for a fresh database.
//!
//! Three users share the password [`DEMO_PASSWORD`]; each owns one welcome
//! article.

use chrono::{DateTime, TimeZone, Utc};
use quill_db::models::user::CreateUser;
use quill_db::repositories::UserRepo;
use quill_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

pub const DEMO_PASSWORD: &str = "Password123!";

const DEMO_USERS: [(&str, &str); 3] = [
    ("admin", "admin@example.com"),
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
];

struct DemoArticle {
    title: &'static str,
    perex: &'static str,
    content: &'static str,
    /// Index into [`DEMO_USERS`].
    author: usize,
    published: (i32, u32, u32, u32, u32),
}

const DEMO_ARTICLES: [DemoArticle; 3] = [
    DemoArticle {
        title: "Welcome to my Blog",
        perex: "This is the first post on my new blogging engine.",
        content: "I built this blog engine from scratch with a REST API and a GraphQL endpoint. Stay tuned for more updates!",
        author: 0,
        published: (2026, 1, 1, 12, 0),
    },
    DemoArticle {
        title: "Getting Started with GraphQL",
        perex: "Learn the basics of GraphQL and how to query this blog with it.",
        content: "GraphQL is a powerful query language for APIs. In this article, we'll explore queries, mutations and subscriptions against the /graphql endpoint.",
        author: 1,
        published: (2026, 1, 5, 14, 30),
    },
    DemoArticle {
        title: "Database Best Practices",
        perex: "Tips and tricks for keeping your relational database healthy.",
        content: "A relational database rewards care. Here are some best practices for indexing, query optimization, and maintaining data integrity.",
        author: 2,
        published: (2026, 1, 10, 9, 15),
    },
];

/// Insert demo users and articles when the users table is empty.
///
/// Returns `true` if data was inserted.
pub async fn seed_demo_data(pool: &DbPool) -> AppResult<bool> {
    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users present, skipping demo data");
        return Ok(false);
    }

    let password_hash = hash_password(DEMO_PASSWORD)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut tx = pool.begin().await?;

    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for (username, email) in DEMO_USERS {
        let input = CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.clone(),
        };
        let user = UserRepo::create(&mut *tx, &input).await?;
        user_ids.push(user.id);
    }

    for article in &DEMO_ARTICLES {
        let published = published_at(article.published)?;
        sqlx::query(
            "INSERT INTO articles (title, perex, content, timestamp, user_id)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(article.title)
        .bind(article.perex)
        .bind(article.content)
        .bind(published)
        .bind(user_ids[article.author])
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        users = DEMO_USERS.len(),
        articles = DEMO_ARTICLES.len(),
        "Demo data inserted"
    );
    Ok(true)
}

fn published_at((y, mo, d, h, mi): (i32, u32, u32, u32, u32)) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .ok_or_else(|| AppError::InternalError(format!("Invalid seed date {y}-{mo}-{d}")))
}
