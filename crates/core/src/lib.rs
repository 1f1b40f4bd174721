//! Domain types and rules for the Quill blog backend.
//!
//! Nothing in this crate touches storage or transport; the db and api crates
//! build on these types.

pub mod article;
pub mod comment;
pub mod error;
pub mod types;
pub mod vote;
pub mod voter;
