//! Application setup and initialization

pub mod server;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use produk_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::constants::PRODUCT_CREATE_PATH;
use crate::handlers;
use crate::state::AppState;

/// Initialize the application (state, routes).
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let state = AppState::new(config)?;
    let router = build_router(state.clone());
    Ok((state, router))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_body = state.config.max_body_size_bytes();

    Router::new()
        .route("/health", get(handlers::health))
        .route(PRODUCT_CREATE_PATH, post(handlers::create_product))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Both limits: axum's own extractor limit and the tower-http layer.
        .layer(axum::extract::DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .with_state(state)
}
