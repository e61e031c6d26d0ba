use std::sync::Arc;
use std::time::Duration;

use produk_core::Config;
use produk_processing::{default_codec, AdaptiveCompressor, AssetConverter};

/// Shared, read-only application state. The codec reference inside the
/// converter is built once here and lives as long as the process.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    pub converter: AssetConverter,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .build()?;

        let converter = AssetConverter::new(AdaptiveCompressor::new(default_codec()));

        Ok(Arc::new(Self {
            config,
            http,
            converter,
        }))
    }
}
