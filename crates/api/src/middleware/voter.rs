//! Voter identity extractor.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use quill_core::voter::VoterIp;

/// The anonymous voter, keyed by the peer IP of the connection.
///
/// Falls back to the `"unknown"` key when the server was not started with
/// connect info (for example under `oneshot` in tests).
#[derive(Debug, Clone)]
pub struct Voter(pub VoterIp);

impl<S> FromRequestParts<S> for Voter
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let voter = VoterIp::from_addr(addr);
        if voter.is_unknown() {
            tracing::debug!("Peer address unavailable, voting under the shared unknown key");
        }
        Ok(Voter(voter))
    }
}
