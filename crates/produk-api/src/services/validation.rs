//! Canonical payload validation
//!
//! Fails closed: every violation is collected so the caller sees the full
//! list at once, before any backend call is made.

use produk_core::error::AppError;
use produk_core::models::ProductPayload;

pub fn validate(payload: &ProductPayload) -> Result<(), AppError> {
    let mut messages: Vec<String> = Vec::new();
    let mut fields: Vec<String> = Vec::new();

    let mut violation = |field: &str, message: &str| {
        messages.push(message.to_string());
        fields.push(field.to_string());
    };

    if payload.category.is_none() {
        violation("kategori", "Kategori wajib dipilih");
    }
    if payload.user_input.is_none() {
        violation("user_input", "User input wajib diisi");
    }
    if payload.name.is_empty() {
        violation("nama", "Nama produk wajib diisi");
    }
    if payload.code.is_empty() {
        violation("kode", "Kode produk wajib diisi");
    }
    // Synthesis from `kode` happens during assembly; an empty URL here means
    // both were absent.
    if payload.url.is_empty() {
        violation("url", "URL wajib diisi");
    }
    match payload.header.as_deref() {
        None => violation("header", "Gambar header wajib diunggah"),
        Some(header) if !header.starts_with("data:image/") => {
            violation("header", "Gambar header harus berupa file gambar");
        }
        Some(_) => {}
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation {
            message: messages.join(". "),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use produk_core::models::ProductPayload;

    fn valid_payload() -> ProductPayload {
        ProductPayload {
            category: Some(3.0),
            user_input: Some(9.0),
            name: "Test".to_string(),
            code: "abc".to_string(),
            url: "/abc".to_string(),
            header: Some("data:image/jpeg;base64,AAAA".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate(&valid_payload()).is_ok());
    }

    #[test]
    fn test_all_violations_are_reported_at_once() {
        let payload = ProductPayload {
            user_input: Some(9.0),
            code: "abc".to_string(),
            url: "/abc".to_string(),
            ..Default::default()
        };
        let err = validate(&payload).unwrap_err();

        let AppError::Validation { message, fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields, vec!["kategori", "nama", "header"]);
        assert!(message.contains("Kategori wajib dipilih"));
        assert!(message.contains("Nama produk wajib diisi"));
        assert!(message.contains("Gambar header wajib diunggah"));
        // Joined for display with ". "
        assert_eq!(message.matches(". ").count(), 2);
    }

    #[test]
    fn test_header_must_be_an_image_data_uri() {
        let mut payload = valid_payload();
        payload.header = Some("data:application/pdf;base64,AAAA".to_string());
        let err = validate(&payload).unwrap_err();
        assert_eq!(err.error_fields(), &["header".to_string()]);
    }
}
