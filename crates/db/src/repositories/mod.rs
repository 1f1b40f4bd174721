//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! the pool as the first argument.

pub mod article_repo;
pub mod comment_repo;
pub mod user_repo;
pub mod vote_repo;

pub use article_repo::ArticleRepo;
pub use comment_repo::CommentRepo;
pub use user_repo::UserRepo;
pub use vote_repo::{CastVote, VoteError, VoteRepo};
