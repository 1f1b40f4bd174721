//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create / update DTOs where the entity is writable
//! - Detail structs with eagerly attached children where readers need them
//!
//! Serialized field names are camelCase to match the public API.

pub mod article;
pub mod comment;
pub mod user;
pub mod vote;
