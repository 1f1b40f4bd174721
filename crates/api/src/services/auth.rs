//! Credential check and token issuance.

use quill_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Verify `username` / `password` and issue a bearer token.
///
/// Unknown users and wrong passwords both yield `None`.
pub async fn login(state: &AppState, username: &str, password: &str) -> AppResult<Option<String>> {
    tracing::info!(username, "Login attempt");

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        tracing::warn!(username, "Failed login attempt");
        return Ok(None);
    };

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username, "Failed login attempt");
        return Ok(None);
    }

    let token = generate_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username, "Successful login");
    Ok(Some(token))
}
