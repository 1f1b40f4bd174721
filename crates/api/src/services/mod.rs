//! Business operations shared by the REST handlers and GraphQL resolvers.
//!
//! Each transport authenticates the caller, calls exactly one function here
//! and serializes the result. Events are published after the storage write
//! has committed.

pub mod articles;
pub mod auth;
pub mod comments;
pub mod votes;
