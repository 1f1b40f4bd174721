#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity is absent, or (for ownership-scoped mutations) not owned by
    /// the caller. The message is shown to the caller verbatim.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
