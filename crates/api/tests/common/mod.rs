#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use quill_api::auth::jwt::JwtConfig;
use quill_api::config::ServerConfig;
use quill_api::router::build_app_router;
use quill_api::seed::{seed_demo_data, DEMO_PASSWORD};
use quill_api::state::AppState;
use quill_events::EventBus;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT key.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        seed_demo_data: false,
        jwt: JwtConfig {
            key: "integration-test-signing-key-0123456789".to_string(),
            issuer: "quill-test".to_string(),
            audience: "quill-test-clients".to_string(),
            expiry_days: 7,
        },
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        event_bus: Arc::new(EventBus::default()),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

/// Build the router and keep a handle on its state (for event bus access).
pub fn build_test_app_with_state(pool: SqlitePool) -> (Router, AppState) {
    let state = test_state(pool);
    (build_app_router(state.clone(), &test_config()), state)
}

/// Insert the demo users (`admin`, `john_doe`, `jane_smith`) and their
/// articles (ids 1, 2, 3).
pub async fn seed(pool: &SqlitePool) {
    let inserted = seed_demo_data(pool).await.expect("seeding should succeed");
    assert!(inserted, "test database should start empty");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a vote as if it came from `peer`. `None` sends no connect info, so
/// the voter key is `"unknown"`.
pub async fn vote_from(
    app: &Router,
    comment_id: i64,
    value: i64,
    peer: Option<[u8; 4]>,
) -> Response<Body> {
    let mut request = json_request(
        Method::POST,
        &format!("/api/comments/{comment_id}/vote"),
        &Value::from(value),
        None,
    );
    if let Some(octets) = peer {
        let addr = SocketAddr::from((octets, 40_000));
        request.extensions_mut().insert(ConnectInfo(addr));
    }
    send(app, request).await
}

/// Run a GraphQL operation over HTTP and return the JSON response.
pub async fn graphql(app: &Router, query: &str, variables: Value, token: Option<&str>) -> Value {
    let body = serde_json::json!({ "query": query, "variables": variables });
    let response = send(app, json_request(Method::POST, "/graphql", &body, token)).await;
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body should be JSON")
}

/// Log in through the REST endpoint and return the bearer token.
pub async fn login(app: &Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": DEMO_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), 200, "login as {username} should succeed");
    body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}
