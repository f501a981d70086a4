use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub upload_dir_writable: bool,
}

/// Liveness plus a check that the upload directory exists and is writable.
///
/// The check only reads metadata; a missing directory is reported, not created.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let upload_dir_writable = upload_dir_writable(&state).await;

    let (status, label) = if upload_dir_writable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            upload_dir_writable,
        }),
    )
}

async fn upload_dir_writable(state: &AppState) -> bool {
    match tokio::fs::metadata(state.storage.root()).await {
        Ok(metadata) => metadata.is_dir() && !metadata.permissions().readonly(),
        Err(e) => {
            tracing::warn!(error = %e, "Upload directory not accessible");
            false
        }
    }
}
