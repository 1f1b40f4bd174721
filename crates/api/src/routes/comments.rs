//! Route definitions for the `/comments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// `POST /{id}` takes an article id; the other routes take a comment id.
///
/// ```text
/// POST /{id}        -> add (requires auth)
/// GET  /{id}        -> get_by_id
/// POST /{id}/vote   -> vote (anonymous, keyed by peer IP)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(comments::get_by_id).post(comments::add))
        .route("/{id}/vote", post(comments::vote))
}
