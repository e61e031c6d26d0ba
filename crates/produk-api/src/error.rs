//! HTTP error response conversion
//!
//! Renders `AppError` into the caller-facing JSON shape
//! `{success:false, message, errors, errorFields}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use produk_core::{AppError, LogLevel};
use serde_json::json;

/// Wrapper type for AppError to implement IntoResponse.
/// Necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (type from produk-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = match app_error {
            AppError::Validation { message, fields } => json!({
                "success": false,
                "message": message,
                "errors": {},
                "errorFields": fields,
            }),
            err => json!({
                "success": false,
                "message": err.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
