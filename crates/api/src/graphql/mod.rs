//! GraphQL transport.
//!
//! Queries and mutations are served at `POST /graphql`, subscriptions over
//! WebSocket at `/graphql/ws`. Resolvers call the same services as the REST
//! handlers.

pub mod handler;
pub mod mutation;
pub mod query;
pub mod subscription;
pub mod types;

use async_graphql::{Context, Schema};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub use handler::{graphiql, graphql_handler};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use subscription::SubscriptionRoot;

pub type QuillSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with the application state attached as context data.
pub fn build_schema(state: AppState) -> QuillSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(state)
        .finish()
}

/// The authenticated caller, or an `UNAUTHORIZED` error.
pub(crate) fn require_user<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a AuthUser> {
    use async_graphql::ErrorExtensions;

    ctx.data_opt::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Authentication required").extend())
}
