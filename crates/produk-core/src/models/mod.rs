pub mod payload;

pub use payload::{GalleryImage, ListPoint, ProductPayload, Testimonial};
