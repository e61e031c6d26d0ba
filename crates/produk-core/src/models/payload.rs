//! Canonical product payload
//!
//! The fully normalized, backend-ready representation of a product submission.
//! Wire field names follow the backend contract (Indonesian), struct fields use
//! English names. Optional scalars serialize only when present: the backend
//! treats field absence differently from an explicit `null`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(rename = "kategori", skip_serializing_if = "Option::is_none")]
    pub category: Option<f64>,

    #[serde(rename = "user_input", skip_serializing_if = "Option::is_none")]
    pub user_input: Option<f64>,

    #[serde(rename = "nama")]
    pub name: String,

    #[serde(rename = "kode")]
    pub code: String,

    /// Always begins with `/`; synthesized from `code` when absent.
    pub url: String,

    #[serde(rename = "deskripsi")]
    pub description: String,

    #[serde(rename = "harga_asli", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(rename = "harga_coret", skip_serializing_if = "Option::is_none")]
    pub strike_price: Option<f64>,

    #[serde(rename = "tanggal_event", skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,

    #[serde(rename = "landingpage", skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<f64>,

    /// Header image as a `data:image/...` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    #[serde(rename = "assign")]
    pub assignees: Vec<i64>,

    #[serde(rename = "list_point")]
    pub list_points: Vec<ListPoint>,

    #[serde(rename = "testimoni")]
    pub testimonials: Vec<Testimonial>,

    #[serde(rename = "video")]
    pub videos: Vec<String>,

    #[serde(rename = "gambar")]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Data-URI of the image, or `None` when the slot carried no file.
    pub path: Option<String>,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "deskripsi", default)]
    pub description: String,
    /// Avatar image as a data-URI.
    #[serde(rename = "gambar", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPoint {
    #[serde(rename = "nama", default)]
    pub name: String,
}
