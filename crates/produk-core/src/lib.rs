//! Produk Core Library
//!
//! This crate provides the canonical payload model, error types, configuration,
//! and scalar normalization shared across the produk gateway components.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, LogLevel};
pub use models::{GalleryImage, ListPoint, ProductPayload, Testimonial};
