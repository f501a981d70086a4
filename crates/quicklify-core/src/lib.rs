//! Quicklify Core Library
//!
//! This crate provides the configuration, error taxonomy, image kinds and shared
//! models used by the storage backend and the HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, ExtensionPolicy};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageKind, StoredImage};
