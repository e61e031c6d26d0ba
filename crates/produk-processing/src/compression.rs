//! Adaptive image compression
//!
//! Iteratively re-encodes an image at decreasing quality until it fits a byte
//! budget or the attempt ceiling is hit. Best-effort: the loop accepts the
//! last attempt even when the budget was never reached, and a codec failure
//! degrades to the original bytes instead of failing the request.

use std::sync::Arc;

use bytes::Bytes;

use crate::codec::ImageCodec;

/// Byte budget a compressed image should fit into (1,000 KB).
pub const TARGET_BYTES: usize = 1000 * 1024;
pub const MAX_WIDTH: u32 = 1600;
pub const MAX_HEIGHT: u32 = 1600;
pub const INITIAL_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 50;
pub const QUALITY_STEP: u8 = 5;
pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct CompressionPolicy {
    pub target_bytes: usize,
    pub max_width: u32,
    pub max_height: u32,
    pub initial_quality: u8,
    pub min_quality: u8,
    pub quality_step: u8,
    pub max_attempts: u32,
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            target_bytes: TARGET_BYTES,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            initial_quality: INITIAL_QUALITY,
            min_quality: MIN_QUALITY,
            quality_step: QUALITY_STEP,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

/// Feedback-controlled compressor over an injected [`ImageCodec`].
#[derive(Clone)]
pub struct AdaptiveCompressor {
    codec: Arc<dyn ImageCodec>,
    policy: CompressionPolicy,
}

impl AdaptiveCompressor {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self::with_policy(codec, CompressionPolicy::default())
    }

    pub fn with_policy(codec: Arc<dyn ImageCodec>, policy: CompressionPolicy) -> Self {
        Self { codec, policy }
    }

    /// Compress `data` toward the byte budget.
    ///
    /// Already-small input is returned unchanged, byte for byte: re-encoding
    /// it would only cost quality. Each attempt re-encodes the *original*
    /// buffer so quality loss never compounds across iterations. Termination
    /// is bounded by `min(max_attempts, quality range / step)`.
    pub fn compress(&self, data: Bytes) -> Bytes {
        let policy = &self.policy;
        if data.len() <= policy.target_bytes {
            return data;
        }

        let mut quality = policy.initial_quality;
        let mut last = data.clone();

        for attempt in 1..=policy.max_attempts {
            match self
                .codec
                .reencode(&data, policy.max_width, policy.max_height, quality)
            {
                Ok(encoded) => {
                    tracing::debug!(
                        attempt,
                        quality,
                        input_bytes = data.len(),
                        output_bytes = encoded.len(),
                        "compression attempt"
                    );
                    let within_budget = encoded.len() <= policy.target_bytes;
                    last = encoded;
                    if within_budget || quality == policy.min_quality {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        bytes = data.len(),
                        "image codec failed, keeping original bytes"
                    );
                    return data;
                }
            }
            quality = quality
                .saturating_sub(policy.quality_step)
                .max(policy.min_quality);
        }

        if last.len() > policy.target_bytes {
            tracing::warn!(
                bytes = last.len(),
                target_bytes = policy.target_bytes,
                "image still exceeds byte budget after final attempt"
            );
        }
        last
    }
}
