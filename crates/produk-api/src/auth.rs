//! Bearer token extraction
//!
//! The gateway only verifies that a bearer token is *present*; the backend
//! owns actual credential validation, so the token is forwarded verbatim.

use axum::{extract::FromRequestParts, http::request::Parts};
use produk_core::AppError;

use crate::error::HttpAppError;

/// The caller's bearer token, forwarded verbatim to the backend.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing authorization header".to_string(),
                ))
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Invalid authorization header format".to_string(),
                ))
            })?;

        Ok(BearerToken(token.to_string()))
    }
}
