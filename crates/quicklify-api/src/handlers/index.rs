use std::sync::Arc;

use axum::{extract::State, response::Html};
use quicklify_core::constants::IMAGE_FIELD_NAME;
use quicklify_core::error::format_size_limit;
use quicklify_core::ImageKind;

use crate::state::AppState;
use crate::utils::html::{render, IndexView};

/// Upload form for browsers
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let accept = ImageKind::ALL
        .iter()
        .map(|kind| kind.mime_type())
        .collect::<Vec<_>>()
        .join(",");
    let max_size = format_size_limit(state.config.max_file_size_bytes);

    render(
        &IndexView {
            action: "/upload",
            field: IMAGE_FIELD_NAME,
            accept: &accept,
            max_size: &max_size,
        },
        "Quicklify",
    )
}
