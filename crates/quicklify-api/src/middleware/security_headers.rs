use axum::http::{header, HeaderValue};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; img-src 'self' data:; \
     style-src 'self'; form-action 'self'; frame-ancestors 'none'";

/// Security headers configuration
#[derive(Clone)]
pub struct SecurityHeadersConfig {
    pub is_production: bool,
    /// Path prefix of stored files; those responses keep their own caching headers
    pub upload_url_path: String,
}

impl SecurityHeadersConfig {
    pub fn new(is_production: bool, upload_url_path: &str) -> Self {
        Self {
            is_production,
            upload_url_path: format!("/{}", upload_url_path.trim_matches('/')),
        }
    }

    fn is_stored_file(&self, path: &str) -> bool {
        path.strip_prefix(&self.upload_url_path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let serves_stored_file = config.is_stored_file(request.uri().path());
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Stored files are served with the type implied by their extension; never sniff.
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // HSTS header (only set in production over HTTPS)
    if config.is_production {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );

    // Upload results and pages are per-request; stored files may be cached.
    if !serves_stored_file && !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, private"),
        );
    }

    response
}
