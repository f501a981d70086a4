//! Route configuration and setup.

use crate::handlers::{health::health_check, index::index, upload::upload_image};
use crate::middleware::{security_headers_middleware, SecurityHeadersConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quicklify_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn build_router(config: &Config, state: Arc<AppState>) -> Router {
    let security_headers_config = Arc::new(SecurityHeadersConfig::new(
        config.is_production(),
        &config.upload_url_path,
    ));

    let upload_url_path = format!("/{}", config.upload_url_path.trim_matches('/'));
    let stored_files = ServeDir::new(&config.upload_dir);

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        request_timeout_secs = config.upload_timeout_secs,
        max_request_body_bytes = config.max_request_body_bytes,
        upload_url_path = %upload_url_path,
        "HTTP layers configured"
    );

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/upload", post(upload_image))
        .route("/upload.php", post(upload_image))
        .nest_service(&upload_url_path, stored_files)
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.upload_timeout_secs,
        )))
        // Multipart reads stop at this many bytes with a 413-classified error.
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state)
}
