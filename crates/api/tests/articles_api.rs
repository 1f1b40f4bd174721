//! HTTP-level integration tests for the `/api/articles` resource.
//!
//! Seeded articles: 1 (admin), 2 (john_doe), 3 (jane_smith).

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, delete_auth, get, login, post_json_auth, put_json_auth, vote_from};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_returns_seeded_articles_in_camel_case(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/articles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let articles = json.as_array().expect("list should be an array");
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[0]["title"], "Welcome to my Blog");
    assert_eq!(articles[0]["userId"], 1);
    assert_eq!(articles[1]["title"], "Getting Started with GraphQL");
    assert_eq!(articles[1]["userId"], 2);
    assert!(articles[2]["comments"].as_array().unwrap().is_empty());
    assert!(articles[0].get("user_id").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_article_is_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/articles/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_returns_201_with_location(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "jane_smith").await;

    let response = post_json_auth(
        &app,
        "/api/articles",
        json!({ "title": "Fresh", "perex": "Short", "content": "Long" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    assert_eq!(location, format!("/api/articles/{}", json["id"]));
    assert_eq!(json["userId"], 3);
    assert!(json["timestamp"].is_string());

    let fetched = body_json(get(&app, &location).await).await;
    assert_eq!(fetched["title"], "Fresh");
    assert_eq!(fetched["comments"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_blank_title_is_400(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "admin").await;

    let response = post_json_auth(
        &app,
        "/api/articles",
        json!({ "title": "  ", "perex": "p", "content": "c" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

/// Omitted and null fields keep their stored values.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update_by_owner(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "john_doe").await;

    let response = put_json_auth(
        &app,
        "/api/articles/2",
        json!({ "title": "GraphQL, Revisited", "content": null }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let article = body_json(get(&app, "/api/articles/2").await).await;
    assert_eq!(article["title"], "GraphQL, Revisited");
    assert_eq!(
        article["perex"],
        "Learn the basics of GraphQL and how to query this blog with it."
    );
    assert!(article["content"].as_str().unwrap().starts_with("GraphQL is"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_by_non_owner_is_404_and_row_unchanged(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "jane_smith").await;

    let response = put_json_auth(
        &app,
        "/api/articles/1",
        json!({ "title": "Hijacked" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Article not found or you don't have permission to edit it."
    );

    let article = body_json(get(&app, "/api/articles/1").await).await;
    assert_eq!(article["title"], "Welcome to my Blog");
}

/// Foreign ownership and absence produce the same response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_matches_foreign(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let token = login(&app, "jane_smith").await;

    let foreign = put_json_auth(&app, "/api/articles/1", json!({ "title": "x" }), &token).await;
    let missing = put_json_auth(&app, "/api/articles/42", json!({ "title": "x" }), &token).await;

    assert_eq!(foreign.status(), missing.status());
    assert_eq!(body_json(foreign).await, body_json(missing).await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_owner_only(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool);
    let admin = login(&app, "admin").await;
    let jane = login(&app, "jane_smith").await;

    let response = delete_auth(&app, "/api/articles/1", &jane).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Article not found or you don't have permission to delete it."
    );
    assert_eq!(get(&app, "/api/articles/1").await.status(), StatusCode::OK);

    let response = delete_auth(&app, "/api/articles/1", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&app, "/api/articles/1").await.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(&app, "/api/articles/1", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_comments_and_votes(pool: SqlitePool) {
    common::seed(&pool).await;
    let app = common::build_test_app(pool.clone());
    let token = login(&app, "admin").await;

    let comment =
        body_json(post_json_auth(&app, "/api/comments/1", json!("First!"), &token).await).await;
    let comment_id = comment["id"].as_i64().unwrap();
    assert_eq!(vote_from(&app, comment_id, 1, Some([10, 0, 0, 1])).await.status(), StatusCode::OK);

    let response = delete_auth(&app, "/api/articles/1", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/comments/{comment_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (votes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(votes, 0);
}
