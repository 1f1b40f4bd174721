//! JSON request body extractor.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in for [`axum::Json`] on request bodies. A missing content type, a
/// syntax error or a body of the wrong shape is rejected as
/// [`AppError::BadRequest`], so clients get the usual error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
