//! Error types module
//!
//! Unified error enum for the gateway. Backend rejections and malformed backend
//! responses are deliberately *not* represented here: they carry the backend's
//! own status code and are classified by the forwarder instead.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for degraded-but-handled conditions
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidInput(String),

    /// A binary upload could not be read or converted. Unlike codec failures
    /// (which degrade to uncompressed passthrough) this aborts the request:
    /// a corrupt upload must not silently become a missing image.
    #[error("{0}")]
    InvalidUpload(String),

    #[error("{message}")]
    Validation {
        /// Violation messages, joined for display with `". "`.
        message: String,
        fields: Vec<String>,
    },

    #[error("Gagal menghubungi backend: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::InvalidInput(_) | AppError::InvalidUpload(_) | AppError::Validation { .. } => {
                400
            }
            AppError::Transport(_) | AppError::Internal(_) => 500,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation { .. } | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Unauthorized(_) | AppError::InvalidUpload(_) => LogLevel::Warn,
            AppError::Transport(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Offending field names, when the error carries them.
    pub fn error_fields(&self) -> &[String] {
        match self {
            AppError::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
