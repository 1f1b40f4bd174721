//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`voter::Voter`] -- the anonymous voter key derived from the peer address.
//! - [`json::AppJson`] -- a JSON body whose rejection uses the error envelope.

pub mod auth;
pub mod json;
pub mod voter;
