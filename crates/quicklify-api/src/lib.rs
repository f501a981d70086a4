//! Quicklify API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup for
//! the image upload service.

// Module declarations
mod handlers;
mod middleware;
mod services;
mod utils;

// Public modules
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
pub use utils::response_format::ResponseFormat;
