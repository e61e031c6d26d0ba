//! Scalar and structured-value normalization
//!
//! Pure helpers that coerce loosely-typed submission values into canonical
//! form. The same logical field may arrive as a JSON-encoded string in
//! multipart mode and as a native array or number in JSON mode; callers must
//! not need to know which. Nothing here ever panics or returns an error.

use serde_json::Value;

/// Parse a numeric-looking string into a float. Empty or non-numeric input
/// yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a loosely-typed value into a number, or `None`.
pub fn normalize_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Coerce a loosely-typed value into a trimmed string; non-strings become `""`.
pub fn normalize_trimmed(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Resolve a value that may be a JSON-encoded string, a native array, or a
/// native object into a concrete collection, falling back on malformed input.
pub fn parse_structured(value: Option<&Value>, fallback: Value) -> Value {
    match value {
        None | Some(Value::Null) => fallback,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return fallback;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed @ (Value::Array(_) | Value::Object(_))) => parsed,
                _ => fallback,
            }
        }
        Some(v @ (Value::Array(_) | Value::Object(_))) => v.clone(),
        Some(_) => fallback,
    }
}
