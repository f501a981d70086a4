//! HTML views rendered with askama (auto-escaped)

use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "upload_success.html")]
pub struct UploadSuccessView<'a> {
    pub url: &'a str,
}

#[derive(Template)]
#[template(path = "upload_error.html")]
pub struct UploadErrorView<'a> {
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView<'a> {
    pub action: &'a str,
    pub field: &'a str,
    pub accept: &'a str,
    pub max_size: &'a str,
}

/// Render a view, degrading to a plain fallback if the template fails.
pub fn render<T: Template>(view: &T, fallback: &str) -> Html<String> {
    match view.render() {
        Ok(body) => Html(body),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render HTML view");
            Html(fallback.to_string())
        }
    }
}
