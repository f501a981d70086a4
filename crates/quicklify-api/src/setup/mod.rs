//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use quicklify_core::Config;
use quicklify_storage::create_storage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Creates both directories; each upload re-checks them in case they are removed.
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let state = Arc::new(AppState::new(config.clone(), storage));
    let router = routes::build_router(&config, state.clone());

    Ok((state, router))
}
