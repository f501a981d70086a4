use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::HttpAppError;
use crate::services::upload::{ImageUploadService, UploadResponse};
use crate::state::AppState;
use crate::utils::base_url::resolve_base_origin;
use crate::utils::html::{render, UploadSuccessView};
use crate::utils::response_format::ResponseFormat;

/// Upload image handler
///
/// Accepts a multipart form with a single file in the `image` field and answers
/// with a link to the stored copy (HTTP 201 Created).
///
/// # Errors
/// - `AppError::MissingFile` - no multipart body, or no file in `image`
/// - `AppError::Transport` - the body broke off or was malformed
/// - `AppError::UnsupportedType` - content is not PNG, JPEG, WEBP or GIF
/// - `AppError::TooLarge` - file exceeds the configured limit
/// - `AppError::StorageWrite` - the file could not be stored
#[tracing::instrument(
    skip(state, headers, uri, multipart),
    fields(operation = "upload_image")
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    format: ResponseFormat,
    headers: HeaderMap,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let expose_details = !state.config.is_production();
    let fail = |err: HttpAppError| err.with_format(format).with_details(expose_details);

    let multipart = multipart.map_err(|e| fail(e.into()))?;

    let service = ImageUploadService::new(&state);
    let image = service
        .upload(multipart)
        .await
        .map_err(|e| fail(e.into()))?;

    let base_origin = resolve_base_origin(&state.config, &headers, &uri);
    let url = image.url(&base_origin, &state.config.upload_url_path);

    let mut response = match format {
        ResponseFormat::Json => (
            StatusCode::CREATED,
            Json(UploadResponse::new(&image, url.clone())),
        )
            .into_response(),
        ResponseFormat::Html => {
            let fallback = format!("✅ Uploaded!<br>Image Link: {}", image.filename);
            let body = render(&UploadSuccessView { url: &url }, &fallback);
            (StatusCode::CREATED, body).into_response()
        }
    };

    if let Ok(location) = HeaderValue::from_str(&url) {
        response.headers_mut().insert(header::LOCATION, location);
    }

    Ok(response)
}
