//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! Handlers return `Result<Response, HttpAppError>`. Errors render with the
//! status from `ErrorMetadata`, an `x-upload-error` header carrying the error code,
//! and a body in the format the client asked for: the short `❌` HTML fragment or
//! an `ErrorResponse` JSON object.

use axum::{
    extract::multipart::MultipartRejection,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use quicklify_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

use crate::utils::html::{render, UploadErrorView};
use crate::utils::response_format::ResponseFormat;

/// Response header carrying the machine-readable error code
pub const UPLOAD_ERROR_HEADER: &str = "x-upload-error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    /// Build the client-facing body, optionally with the underlying cause.
    pub fn from_app_error(error: &AppError, expose_details: bool) -> Self {
        // Sensitive errors (storage paths, OS messages) never leave the server.
        let expose = expose_details && !error.is_sensitive();
        Self {
            error: error.client_message(),
            code: error.error_code().to_string(),
            details: expose.then(|| error.detailed_message()),
            error_type: expose.then(|| error.error_type().to_string()),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
///
/// Also remembers the negotiated response format and whether error details may be
/// shown, since both are request-dependent.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub format: ResponseFormat,
    pub expose_details: bool,
}

impl HttpAppError {
    pub fn new(error: AppError) -> Self {
        Self {
            error,
            format: ResponseFormat::default(),
            expose_details: false,
        }
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_details(mut self, expose_details: bool) -> Self {
        self.expose_details = expose_details;
        self
    }
}

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError::new(err)
    }
}

/// A request that is not a well-formed multipart form carries no file.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError::new(AppError::MissingFile(rejection.body_text()))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Upload rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Upload rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Upload failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.error;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut response = match self.format {
            ResponseFormat::Json => (
                status,
                Json(ErrorResponse::from_app_error(app_error, self.expose_details)),
            )
                .into_response(),
            ResponseFormat::Html => {
                let message = app_error.client_message();
                let fallback = format!("❌ {}", message);
                let body = render(&UploadErrorView { message: &message }, &fallback);
                (status, body).into_response()
            }
        };

        response.headers_mut().insert(
            UPLOAD_ERROR_HEADER,
            HeaderValue::from_static(app_error.error_code()),
        );
        response
    }
}
