//! Payload assembly
//!
//! Collapses a raw submission - multipart flat keys or a JSON object tree -
//! into one canonical `ProductPayload`. The multipart path reconstructs
//! bracket-indexed groups and converts binary uploads; the JSON path resolves
//! structured fields through the safe parser and normalizes inline image
//! strings. Both paths apply the same scalar and URL rules.

use produk_core::error::AppError;
use produk_core::models::{GalleryImage, ListPoint, ProductPayload, Testimonial};
use produk_core::normalize::{normalize_number, normalize_trimmed, parse_number, parse_structured};
use produk_processing::{ensure_data_uri, AssetConverter};
use serde_json::{json, Value};

use super::form::FormBag;

/// Assemble the canonical payload from a multipart submission.
///
/// Conversion failures (corrupt uploads) propagate: extraction aborts rather
/// than silently dropping an image.
pub fn assemble_multipart(
    bag: &FormBag,
    converter: &AssetConverter,
) -> Result<ProductPayload, AppError> {
    let text = |key: &str| bag.text(key).map(str::trim).unwrap_or_default().to_string();
    let number = |key: &str| bag.text(key).and_then(parse_number);
    let optional_text = |key: &str| {
        bag.text(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let structured = |key: &str| {
        parse_structured(
            bag.text(key).map(|s| Value::String(s.to_string())).as_ref(),
            json!([]),
        )
    };

    let header = bag
        .file("header")
        .map(|f| converter.to_data_uri(f))
        .transpose()?;

    let mut payload = ProductPayload {
        category: number("kategori"),
        user_input: number("user_input"),
        name: text("nama"),
        code: text("kode"),
        url: text("url"),
        description: text("deskripsi"),
        price: number("harga_asli"),
        strike_price: number("harga_coret"),
        event_date: optional_text("tanggal_event"),
        landing_page: optional_text("landingpage"),
        status: number("status"),
        header,
        assignees: number_list(&structured("assign")),
        list_points: list_points(&structured("list_point")),
        testimonials: assemble_testimonials(bag, converter, &structured("testimoni"))?,
        videos: string_list(&structured("video")),
        images: assemble_gallery(bag, converter)?,
    };

    apply_url_rules(&mut payload);
    Ok(payload)
}

/// Assemble the canonical payload from a JSON submission. Already-nested
/// structures need no flattening or reassembly; inline image strings only get
/// the data-URI scheme enforced.
pub fn assemble_json(body: &Value) -> ProductPayload {
    let number = |key: &str| body.get(key).and_then(normalize_number);
    let text = |key: &str| body.get(key).map(normalize_trimmed).unwrap_or_default();
    let optional_text = |key: &str| {
        body.get(key)
            .map(normalize_trimmed)
            .filter(|s| !s.is_empty())
    };
    let structured = |key: &str| parse_structured(body.get(key), json!([]));

    let header = body
        .get("header")
        .and_then(Value::as_str)
        .and_then(ensure_data_uri);

    let mut payload = ProductPayload {
        category: number("kategori"),
        user_input: number("user_input"),
        name: text("nama"),
        code: text("kode"),
        url: text("url"),
        description: text("deskripsi"),
        price: number("harga_asli"),
        strike_price: number("harga_coret"),
        event_date: optional_text("tanggal_event"),
        landing_page: optional_text("landingpage"),
        status: number("status"),
        header,
        assignees: number_list(&structured("assign")),
        list_points: list_points(&structured("list_point")),
        testimonials: testimonials_from_value(&structured("testimoni")),
        videos: string_list(&structured("video")),
        images: gallery_from_value(&structured("gambar")),
    };

    apply_url_rules(&mut payload);
    payload
}

/// `url` defaults to `"/" + kode`; a supplied URL always gets a leading slash.
fn apply_url_rules(payload: &mut ProductPayload) {
    if payload.url.is_empty() {
        if !payload.code.is_empty() {
            payload.url = format!("/{}", payload.code);
        }
    } else if !payload.url.starts_with('/') {
        payload.url = format!("/{}", payload.url);
    }
}

/// Reconstruct `gambar[i][path|caption]` in ascending index order.
fn assemble_gallery(
    bag: &FormBag,
    converter: &AssetConverter,
) -> Result<Vec<GalleryImage>, AppError> {
    let mut images = Vec::new();
    for idx in bag.group_indices("gambar") {
        let path = bag
            .file(&format!("gambar[{idx}][path]"))
            .map(|f| converter.to_data_uri(f))
            .transpose()?;
        let caption = bag
            .text(&format!("gambar[{idx}][caption]"))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        images.push(GalleryImage { path, caption });
    }
    Ok(images)
}

/// Testimonials arrive either as indexed flat keys (with avatar files) or as
/// one JSON-encoded array; the indexed form wins when both are present.
fn assemble_testimonials(
    bag: &FormBag,
    converter: &AssetConverter,
    parsed: &Value,
) -> Result<Vec<Testimonial>, AppError> {
    if !bag.has_group("testimoni") {
        return Ok(testimonials_from_value(parsed));
    }

    let mut testimonials = Vec::new();
    for idx in bag.group_indices("testimoni") {
        let avatar = bag
            .file(&format!("testimoni[{idx}][gambar]"))
            .map(|f| converter.to_data_uri(f))
            .transpose()?;
        let field = |name: &str| {
            bag.text(&format!("testimoni[{idx}][{name}]"))
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };
        testimonials.push(Testimonial {
            name: field("nama"),
            description: field("deskripsi"),
            avatar,
        });
    }
    Ok(testimonials)
}

fn testimonials_from_value(value: &Value) -> Vec<Testimonial> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| Testimonial {
            name: normalize_trimmed(item.get("nama").unwrap_or(&Value::Null)),
            description: normalize_trimmed(item.get("deskripsi").unwrap_or(&Value::Null)),
            avatar: item
                .get("gambar")
                .and_then(Value::as_str)
                .and_then(ensure_data_uri),
        })
        .collect()
}

fn gallery_from_value(value: &Value) -> Vec<GalleryImage> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| GalleryImage {
            path: item
                .get("path")
                .and_then(Value::as_str)
                .and_then(ensure_data_uri),
            caption: normalize_trimmed(item.get("caption").unwrap_or(&Value::Null)),
        })
        .collect()
}

/// A list point is either a bare string or an object with `nama`.
fn list_points(value: &Value) -> Vec<ListPoint> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(_) => Some(normalize_trimmed(item.get("nama").unwrap_or(&Value::Null))),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .map(|name| ListPoint { name })
        .collect()
}

fn number_list(value: &Value) -> Vec<i64> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(normalize_number)
        .map(|n| n as i64)
        .collect()
}

fn string_list(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(normalize_trimmed)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::form::FormValue;
    use bytes::Bytes;
    use produk_processing::{AdaptiveCompressor, AssetConverter, DisabledCodec, UploadedFile};
    use std::sync::Arc;

    fn converter() -> AssetConverter {
        AssetConverter::new(AdaptiveCompressor::new(Arc::new(DisabledCodec)))
    }

    fn text_bag(fields: &[(&str, &str)]) -> FormBag {
        let mut bag = FormBag::default();
        for (k, v) in fields {
            bag.push(k.to_string(), FormValue::Text(v.to_string()));
        }
        bag
    }

    fn png_upload(name: &str) -> UploadedFile {
        UploadedFile {
            bytes: Bytes::from_static(b"fake png bytes"),
            content_type: "image/png".to_string(),
            filename: Some(name.to_string()),
        }
    }

    #[test]
    fn test_gallery_order_follows_index_not_key_order() {
        let bag = text_bag(&[
            ("gambar[2][caption]", "b"),
            ("gambar[0][caption]", "a"),
        ]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        let captions: Vec<&str> = payload
            .images
            .iter()
            .map(|img| img.caption.as_str())
            .collect();
        assert_eq!(captions, vec!["a", "b"]);
        assert!(payload.images.iter().all(|img| img.path.is_none()));
    }

    #[test]
    fn test_url_is_synthesized_from_code() {
        let bag = text_bag(&[("kode", "promo-123")]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();
        assert_eq!(payload.url, "/promo-123");
    }

    #[test]
    fn test_supplied_url_gets_leading_slash() {
        let bag = text_bag(&[("kode", "abc"), ("url", "promo-123")]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();
        assert_eq!(payload.url, "/promo-123");
    }

    #[test]
    fn test_scalars_normalize_or_null() {
        let bag = text_bag(&[
            ("kategori", "3"),
            ("harga_asli", "150000"),
            ("harga_coret", "not a number"),
            ("status", ""),
            ("nama", "  Kelas Premium  "),
        ]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        assert_eq!(payload.category, Some(3.0));
        assert_eq!(payload.price, Some(150000.0));
        assert_eq!(payload.strike_price, None);
        assert_eq!(payload.status, None);
        assert_eq!(payload.name, "Kelas Premium");
    }

    #[test]
    fn test_structured_strings_are_parsed() {
        let bag = text_bag(&[
            ("assign", "[1, 2, \"7\"]"),
            ("list_point", r#"[{"nama":"Akses selamanya"},"Grup diskusi"]"#),
            ("video", r#"["https://youtu.be/a",""]"#),
            ("testimoni", r#"[{"nama":"Budi","deskripsi":"Mantap"}]"#),
        ]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        assert_eq!(payload.assignees, vec![1, 2, 7]);
        assert_eq!(payload.list_points.len(), 2);
        assert_eq!(payload.list_points[0].name, "Akses selamanya");
        assert_eq!(payload.videos, vec!["https://youtu.be/a".to_string()]);
        assert_eq!(payload.testimonials[0].name, "Budi");
    }

    #[test]
    fn test_malformed_structured_string_falls_back_empty() {
        let bag = text_bag(&[("assign", "{{{not json"), ("list_point", "")]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();
        assert!(payload.assignees.is_empty());
        assert!(payload.list_points.is_empty());
    }

    #[test]
    fn test_header_file_becomes_data_uri() {
        let mut bag = text_bag(&[("nama", "Test")]);
        bag.push("header".to_string(), FormValue::File(png_upload("h.png")));
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        let header = payload.header.expect("header converted");
        assert!(header.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_indexed_testimonials_win_over_json_string() {
        let mut bag = text_bag(&[
            ("testimoni", r#"[{"nama":"Ignored"}]"#),
            ("testimoni[0][nama]", "Budi"),
            ("testimoni[0][deskripsi]", "Mantap"),
        ]);
        bag.push(
            "testimoni[0][gambar]".to_string(),
            FormValue::File(png_upload("budi.png")),
        );
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        assert_eq!(payload.testimonials.len(), 1);
        assert_eq!(payload.testimonials[0].name, "Budi");
        assert!(payload.testimonials[0]
            .avatar
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_missing_subfields_default_instead_of_failing() {
        let bag = text_bag(&[("gambar[0][caption]", "only a caption")]);
        let payload = assemble_multipart(&bag, &converter()).unwrap();

        assert_eq!(payload.images.len(), 1);
        assert_eq!(payload.images[0].path, None);
        assert_eq!(payload.images[0].caption, "only a caption");
    }

    #[test]
    fn test_json_assembly() {
        let body = serde_json::json!({
            "kategori": 3,
            "user_input": "9",
            "nama": " Test ",
            "kode": "abc",
            "header": "AAAA",
            "assign": [4, 5],
            "list_point": [{"nama": "Poin"}],
            "video": "[\"https://youtu.be/x\"]",
            "gambar": [{"path": "data:image/png;base64,BBBB", "caption": " cover "}],
            "testimoni": [{"nama": "Ani", "deskripsi": "Bagus", "gambar": "CCCC"}],
        });
        let payload = assemble_json(&body);

        assert_eq!(payload.category, Some(3.0));
        assert_eq!(payload.user_input, Some(9.0));
        assert_eq!(payload.name, "Test");
        assert_eq!(payload.url, "/abc");
        assert_eq!(
            payload.header.as_deref(),
            Some("data:image/jpeg;base64,AAAA"),
            "raw base64 gets the default prefix"
        );
        assert_eq!(payload.assignees, vec![4, 5]);
        // `video` arrived as a JSON-encoded string and still parses.
        assert_eq!(payload.videos, vec!["https://youtu.be/x".to_string()]);
        assert_eq!(
            payload.images[0].path.as_deref(),
            Some("data:image/png;base64,BBBB")
        );
        assert_eq!(payload.images[0].caption, "cover");
        assert_eq!(
            payload.testimonials[0].avatar.as_deref(),
            Some("data:image/jpeg;base64,CCCC")
        );
    }

    #[test]
    fn test_blank_file_inputs_are_treated_as_absent() {
        // An unfilled browser file input arrives as a zero-byte part with an
        // empty filename; it must not abort assembly.
        fn blank_upload() -> UploadedFile {
            UploadedFile {
                bytes: Bytes::new(),
                content_type: "application/octet-stream".to_string(),
                filename: Some(String::new()),
            }
        }

        let mut bag = text_bag(&[("nama", "Test"), ("gambar[0][caption]", "cover")]);
        bag.push("gambar[0][path]".to_string(), FormValue::File(blank_upload()));
        bag.push("header".to_string(), FormValue::File(blank_upload()));

        let payload = assemble_multipart(&bag, &converter()).unwrap();

        assert_eq!(payload.header, None);
        assert_eq!(payload.images.len(), 1);
        assert_eq!(payload.images[0].path, None);
        assert_eq!(payload.images[0].caption, "cover");
    }

    #[test]
    fn test_empty_upload_aborts_assembly() {
        let mut bag = text_bag(&[("nama", "Test")]);
        bag.push(
            "header".to_string(),
            FormValue::File(UploadedFile {
                bytes: Bytes::new(),
                content_type: "image/png".to_string(),
                filename: Some("corrupt.png".to_string()),
            }),
        );
        assert!(assemble_multipart(&bag, &converter()).is_err());
    }
}
