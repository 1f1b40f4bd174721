//! Axum handlers for the GraphQL endpoint.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::Extension;

use super::QuillSchema;
use crate::middleware::auth::AuthUser;
use crate::middleware::voter::Voter;
use crate::state::AppState;

/// POST /graphql
///
/// The caller is attached as request data when a valid bearer token is
/// present. An absent or invalid token is not an error here; mutations that
/// need a user reject the request themselves.
pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(schema): Extension<QuillSchema>,
    Voter(voter): Voter,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner().data(voter);
    if headers.contains_key(axum::http::header::AUTHORIZATION) {
        match AuthUser::from_headers(&headers, &state.config.jwt) {
            Ok(user) => request = request.data(user),
            Err(err) => tracing::debug!(error = %err, "Ignoring invalid GraphQL credentials"),
        }
    }
    schema.execute(request).await.into()
}

/// GET /graphql -- GraphiQL explorer.
pub async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql/ws")
            .finish(),
    )
}
