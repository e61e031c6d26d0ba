//! Create-product handler
//!
//! Orchestrates the pipeline: branch on content type, assemble the canonical
//! payload (reconstructing indexed groups and converting uploads on the
//! multipart path), validate it, then forward it to the backend and translate
//! the outcome into the caller-facing response.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use produk_core::error::AppError;
use produk_core::models::ProductPayload;
use serde_json::{json, Value};

use crate::auth::BearerToken;
use crate::error::HttpAppError;
use crate::services::form::{FormBag, FormValue};
use crate::services::{assembler, forwarder, validation};
use crate::state::AppState;
use produk_processing::UploadedFile;

#[tracing::instrument(skip(state, request), fields(operation = "create_product"))]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    bearer: BearerToken,
    request: Request,
) -> Result<Response, HttpAppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let payload = if content_type.starts_with("multipart/form-data") {
        extract_multipart(&state, request).await?
    } else if content_type.starts_with("application/json") {
        extract_json(&state, request).await?
    } else {
        return Err(AppError::InvalidInput(format!(
            "Content-Type tidak didukung: '{content_type}'"
        ))
        .into());
    };

    // Fail fast: no backend call for an invalid payload.
    validation::validate(&payload)?;

    let outcome = forwarder::create_product(
        &state.http,
        &state.config.backend_url,
        &bearer.0,
        &payload,
    )
    .await?;

    Ok(render_outcome(outcome))
}

async fn extract_multipart(
    state: &Arc<AppState>,
    request: Request,
) -> Result<ProductPayload, HttpAppError> {
    let multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::InvalidInput(format!("Body multipart tidak valid: {e}")))?;
    let bag = collect_form(multipart).await?;

    // Compression is CPU-bound; keep it off the request-handling threads.
    let converter = state.converter.clone();
    let payload = tokio::task::spawn_blocking(move || assembler::assemble_multipart(&bag, &converter))
        .await
        .map_err(|e| AppError::Internal(format!("assembly task failed: {e}")))??;
    Ok(payload)
}

async fn extract_json(
    state: &Arc<AppState>,
    request: Request,
) -> Result<ProductPayload, HttpAppError> {
    let bytes = axum::body::to_bytes(request.into_body(), state.config.max_body_size_bytes())
        .await
        .map_err(|e| AppError::InvalidInput(format!("Gagal membaca body: {e}")))?;
    let body: Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::InvalidInput(format!("Body JSON tidak valid: {e}")))?;
    Ok(assembler::assemble_json(&body))
}

/// Drain every multipart field into the flat key space.
async fn collect_form(mut multipart: Multipart) -> Result<FormBag, AppError> {
    let mut bag = FormBag::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Body multipart tidak valid: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if field.file_name().is_some() {
            let filename = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| {
                AppError::InvalidUpload(format!("Gagal membaca file '{name}': {e}"))
            })?;
            bag.push(
                name,
                FormValue::File(UploadedFile {
                    bytes,
                    content_type,
                    filename,
                }),
            );
        } else {
            let text = field.text().await.map_err(|e| {
                AppError::InvalidInput(format!("Gagal membaca field '{name}': {e}"))
            })?;
            bag.push(name, FormValue::Text(text));
        }
    }
    Ok(bag)
}

fn render_outcome(outcome: forwarder::ForwardOutcome) -> Response {
    match outcome {
        forwarder::ForwardOutcome::Success { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
            Json(body),
        )
            .into_response(),
        forwarder::ForwardOutcome::Rejected {
            status,
            message,
            errors,
            error_fields,
        } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
            Json(json!({
                "success": false,
                "message": message,
                "errors": errors,
                "errorFields": error_fields,
            })),
        )
            .into_response(),
        forwarder::ForwardOutcome::Malformed {
            status,
            raw_snippet,
        } => {
            tracing::error!(backend_status = status, "backend response was not JSON");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Respons backend tidak valid",
                    "raw_response": raw_snippet,
                })),
            )
                .into_response()
        }
    }
}
