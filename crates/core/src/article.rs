//! Article field rules shared by the REST and GraphQL layers.

use crate::error::CoreError;

/// Maximum length of an article title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of an article perex (summary).
pub const MAX_PEREX_LENGTH: usize = 1_000;

/// Validate a new article. The title must be non-blank; perex and content may
/// be empty.
pub fn validate_new_article(title: &str, perex: &str) -> Result<(), CoreError> {
    validate_title(title)?;
    validate_perex(perex)
}

/// Validate the fields supplied to a partial update. Omitted fields are not
/// checked; a supplied title must still be non-blank, so a title can never be
/// cleared.
pub fn validate_article_patch(
    title: Option<&str>,
    perex: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(perex) = perex {
        validate_perex(perex)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Article title must not be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Article title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_perex(perex: &str) -> Result<(), CoreError> {
    if perex.chars().count() > MAX_PEREX_LENGTH {
        return Err(CoreError::Validation(format!(
            "Article perex exceeds maximum length of {MAX_PEREX_LENGTH} characters"
        )));
    }
    Ok(())
}
