//! Backend forwarding
//!
//! Issues the outbound create-product call and classifies the backend's
//! response. The backend is inconsistent about where it nests field errors
//! (`errors` vs `data.errors`); that inconsistency is normalized here, at one
//! seam, so it never leaks into the caller-facing contract.

use produk_core::error::AppError;
use produk_core::models::ProductPayload;
use serde_json::{json, Value};

use crate::constants::{PRODUCT_CREATE_PATH, RAW_SNIPPET_MAX_CHARS};

#[derive(Debug)]
pub enum ForwardOutcome {
    /// 2xx JSON response, passed through verbatim.
    Success { status: u16, body: Value },
    /// Non-2xx JSON response, errors normalized into one shape.
    Rejected {
        status: u16,
        message: String,
        errors: Value,
        error_fields: Vec<String>,
    },
    /// The backend answered with something that is not JSON (for example an
    /// HTML error page); surfaced with a truncated snippet for diagnosis.
    Malformed { status: u16, raw_snippet: String },
}

/// Forward the canonical payload. The caller's bearer token travels verbatim;
/// `None` optional fields were already stripped by the payload's serializer.
/// Transport failures surface as `AppError::Transport` - nothing is retried
/// here.
pub async fn create_product(
    client: &reqwest::Client,
    backend_url: &str,
    token: &str,
    payload: &ProductPayload,
) -> Result<ForwardOutcome, AppError> {
    let url = format!(
        "{}{}",
        backend_url.trim_end_matches('/'),
        PRODUCT_CREATE_PATH
    );

    let response = client
        .post(&url)
        .bearer_auth(token)
        .json(payload)
        .send()
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    let status = response.status().as_u16();

    // Read as text first: a misconfigured backend may answer with HTML and
    // that must not crash the handler.
    let body = response
        .text()
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(status, "backend returned a non-JSON body");
            return Ok(ForwardOutcome::Malformed {
                status,
                raw_snippet: truncate_snippet(&body),
            });
        }
    };

    if (200..300).contains(&status) {
        return Ok(ForwardOutcome::Success {
            status,
            body: parsed,
        });
    }

    let errors = extract_errors(&parsed);
    let error_fields = errors
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Gagal menyimpan produk")
        .to_string();

    tracing::debug!(status, message = %message, "backend rejected the payload");
    Ok(ForwardOutcome::Rejected {
        status,
        message,
        errors,
        error_fields,
    })
}

/// Field errors live either at the top level or under `data`.
fn extract_errors(body: &Value) -> Value {
    body.get("errors")
        .filter(|v| v.is_object())
        .or_else(|| {
            body.get("data")
                .and_then(|data| data.get("errors"))
                .filter(|v| v.is_object())
        })
        .cloned()
        .unwrap_or_else(|| json!({}))
}

fn truncate_snippet(body: &str) -> String {
    match body.char_indices().nth(RAW_SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
