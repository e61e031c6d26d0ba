//! Binary asset conversion
//!
//! Turns an uploaded file or an inline base64 string into a canonical
//! data-URI. Image content passes through the adaptive compressor first;
//! everything else is embedded unchanged.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use produk_core::error::AppError;

use crate::compression::AdaptiveCompressor;

/// One uploaded binary part: the full byte buffer plus what the transport
/// declared about it. Transient; consumed into a data-URI and discarded.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub content_type: String,
    pub filename: Option<String>,
}

impl UploadedFile {
    /// True for the placeholder part a browser submits when an optional file
    /// input is left unfilled: zero bytes and an empty (or missing) filename.
    /// Such a part means "no file", not a corrupt upload.
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty() && self.filename.as_deref().unwrap_or("").is_empty()
    }
}

#[derive(Clone)]
pub struct AssetConverter {
    compressor: AdaptiveCompressor,
}

impl AssetConverter {
    pub fn new(compressor: AdaptiveCompressor) -> Self {
        Self { compressor }
    }

    /// Convert an upload into `data:<mime>;base64,<payload>`.
    ///
    /// Failures here propagate to the caller: a corrupt upload must abort the
    /// extraction rather than silently become a missing image.
    pub fn to_data_uri(&self, file: &UploadedFile) -> Result<String, AppError> {
        if file.bytes.is_empty() {
            let name = file.filename.as_deref().unwrap_or("(tanpa nama)");
            return Err(AppError::InvalidUpload(format!(
                "File unggahan '{name}' kosong"
            )));
        }

        let bytes = if file.content_type.starts_with("image/") {
            self.compressor.compress(file.bytes.clone())
        } else {
            file.bytes.clone()
        };

        Ok(format!(
            "data:{};base64,{}",
            file.content_type,
            BASE64.encode(&bytes)
        ))
    }
}

/// Normalize an inline image string from a JSON submission: an existing
/// `data:` scheme is kept, raw base64 gets the default JPEG prefix, empty
/// input means "no image".
pub fn ensure_data_uri(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("data:") {
        Some(trimmed.to_string())
    } else {
        Some(format!("data:image/jpeg;base64,{trimmed}"))
    }
}
