//! Image codec capability seam
//!
//! Compression is an optimization, not a correctness requirement, so the
//! imaging stack is modeled as a capability: callers hold an `Arc<dyn
//! ImageCodec>` built once at startup, and the degraded path
//! ([`DisabledCodec`]) is explicit and testable rather than a lazy probe.

use std::sync::Arc;

use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("image codec not available")]
    Unavailable,

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),
}

/// Re-encoding capability over the optional imaging stack.
pub trait ImageCodec: Send + Sync {
    /// Decode `data`, bound it to `max_width`×`max_height` (aspect ratio
    /// preserved, never upscaled) and re-encode it at `quality` in its source
    /// format. JPEG takes `quality` as its lossy quality parameter; PNG maps
    /// it onto a compression level.
    fn reencode(
        &self,
        data: &[u8],
        max_width: u32,
        max_height: u32,
        quality: u8,
    ) -> Result<Bytes, CodecError>;
}

/// No-op codec used when the imaging stack is compiled out. Every call fails
/// with [`CodecError::Unavailable`], which the compressor treats as "keep the
/// original bytes".
pub struct DisabledCodec;

impl ImageCodec for DisabledCodec {
    fn reencode(
        &self,
        _data: &[u8],
        _max_width: u32,
        _max_height: u32,
        _quality: u8,
    ) -> Result<Bytes, CodecError> {
        Err(CodecError::Unavailable)
    }
}

/// The codec the process runs with: the `image`-backed implementation when the
/// `codec` feature is enabled, the disabled passthrough otherwise.
pub fn default_codec() -> Arc<dyn ImageCodec> {
    #[cfg(feature = "codec")]
    {
        Arc::new(ImageRsCodec)
    }
    #[cfg(not(feature = "codec"))]
    {
        Arc::new(DisabledCodec)
    }
}

#[cfg(feature = "codec")]
pub struct ImageRsCodec;

#[cfg(feature = "codec")]
impl ImageCodec for ImageRsCodec {
    fn reencode(
        &self,
        data: &[u8],
        max_width: u32,
        max_height: u32,
        quality: u8,
    ) -> Result<Bytes, CodecError> {
        use image::codecs::jpeg::JpegEncoder;
        use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
        use image::{imageops::FilterType, GenericImageView, ImageFormat, ImageReader};
        use std::io::Cursor;

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| CodecError::Decode("unrecognized image format".to_string()))?;
        let img = reader
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        let (width, height) = img.dimensions();
        let img = if width > max_width || height > max_height {
            img.resize(max_width, max_height, FilterType::Lanczos3)
        } else {
            img
        };

        let mut buffer = Vec::new();
        match format {
            ImageFormat::Png => {
                // PNG is lossless; map the quality knob onto compression effort.
                let compression = if quality >= 75 {
                    CompressionType::Default
                } else {
                    CompressionType::Best
                };
                let encoder = PngEncoder::new_with_quality(
                    Cursor::new(&mut buffer),
                    compression,
                    PngFilter::Adaptive,
                );
                img.write_with_encoder(encoder)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            _ => {
                // JPEG family (and anything else lossy-capable) goes through
                // the JPEG encoder at the requested quality.
                let rgb = img.to_rgb8();
                let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
                encoder
                    .encode_image(&rgb)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
        }

        Ok(Bytes::from(buffer))
    }
}

#[cfg(all(test, feature = "codec"))]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_reencode_bounds_dimensions() {
        let img = RgbaImage::from_pixel(3200, 1600, Rgba([200, 40, 40, 255]));
        let data = encode_png(&img);

        let out = ImageRsCodec.reencode(&data, 1600, 1600, 85).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        let (w, h) = decoded.dimensions();
        assert!(w <= 1600 && h <= 1600);
        // Aspect ratio preserved: 2:1 input stays 2:1.
        assert_eq!(w, 1600);
        assert_eq!(h, 800);
    }

    #[test]
    fn test_reencode_never_upscales() {
        let img = RgbaImage::from_pixel(100, 80, Rgba([10, 10, 10, 255]));
        let data = encode_png(&img);

        let out = ImageRsCodec.reencode(&data, 1600, 1600, 85).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (100, 80));
    }

    #[test]
    fn test_reencode_keeps_png_format() {
        let img = RgbaImage::from_pixel(64, 64, Rgba([0, 128, 0, 255]));
        let data = encode_png(&img);

        let out = ImageRsCodec.reencode(&data, 1600, 1600, 60).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            ImageFormat::Png,
            "PNG input must stay PNG"
        );
    }

    #[test]
    fn test_reencode_jpeg_at_lower_quality_shrinks_and_stays_jpeg() {
        use image::codecs::jpeg::JpegEncoder;

        // Noisy content keeps the high-quality encoding large enough that a
        // quality drop must shrink it.
        let img = RgbaImage::from_fn(2000, 2000, |x, y| {
            let v = (x.wrapping_mul(41) ^ y.wrapping_mul(23)) as u8;
            Rgba([v, v.wrapping_add(67), v.wrapping_mul(7), 255])
        });
        let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(Cursor::new(&mut data), 95)
            .encode_image(&rgb)
            .unwrap();

        let out = ImageRsCodec.reencode(&data, 1600, 1600, 50).unwrap();

        assert_eq!(
            image::guess_format(&out).unwrap(),
            ImageFormat::Jpeg,
            "JPEG input must stay JPEG"
        );
        assert!(out.len() < data.len());
        let decoded = image::load_from_memory(&out).unwrap();
        let (w, h) = decoded.dimensions();
        assert!(w <= 1600 && h <= 1600);
    }

    #[test]
    fn test_reencode_rejects_garbage() {
        let err = ImageRsCodec.reencode(b"definitely not an image", 1600, 1600, 85);
        assert!(err.is_err());
    }
}
