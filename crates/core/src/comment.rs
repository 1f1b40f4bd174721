//! Comment field rules.

use crate::error::CoreError;

/// Maximum length of a comment body.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Validate comment text: non-blank and within [`MAX_COMMENT_LENGTH`].
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}
