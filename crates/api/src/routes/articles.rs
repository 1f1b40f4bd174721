//! Route definitions for the `/articles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (requires auth)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (requires auth, owner only)
/// DELETE /{id}    -> delete (requires auth, owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route(
            "/{id}",
            get(articles::get_by_id)
                .put(articles::update)
                .delete(articles::delete),
        )
}
