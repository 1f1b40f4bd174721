pub mod articles;
pub mod auth;
pub mod comments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /articles                     articles (list, get, create, update, delete)
/// /comments                     comments (add, get) and votes
/// /auth                         login
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::router())
        .nest("/comments", comments::router())
        .nest("/auth", auth::router())
}
