//! Produk Processing Library
//!
//! Binary asset handling for the gateway: the image codec capability seam,
//! the adaptive byte-budget compressor, and data-URI conversion.

pub mod codec;
pub mod compression;
pub mod data_uri;

pub use codec::{default_codec, CodecError, DisabledCodec, ImageCodec};
pub use compression::{AdaptiveCompressor, CompressionPolicy};
pub use data_uri::{ensure_data_uri, AssetConverter, UploadedFile};

#[cfg(feature = "codec")]
pub use codec::ImageRsCodec;
