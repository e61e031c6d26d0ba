//! Produk API Library
//!
//! This crate provides the HTTP handlers, payload assembly, validation, and
//! backend forwarding of the produk gateway.

// Module declarations
pub mod constants;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
