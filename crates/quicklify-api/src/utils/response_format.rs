//! Response format negotiation from the `Accept` header

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::header::ACCEPT;
use http::request::Parts;
use http::HeaderMap;

/// Body format of upload responses.
///
/// HTML is the default, matching what browser forms expect. JSON is chosen only
/// when the client ranks `application/json` above `text/html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Html,
    Json,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut json_q: Option<f32> = None;
        let mut html_q: Option<f32> = None;

        for value in headers.get_all(ACCEPT) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for range in value.split(',') {
                let mut parts = range.split(';');
                let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
                let q = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);

                let slot = match media.as_str() {
                    "application/json" => &mut json_q,
                    "text/html" => &mut html_q,
                    _ => continue,
                };
                *slot = Some(slot.map_or(q, |prev| prev.max(q)));
            }
        }

        match (json_q, html_q) {
            (Some(json), None) if json > 0.0 => ResponseFormat::Json,
            (Some(json), Some(html)) if json > html => ResponseFormat::Json,
            _ => ResponseFormat::Html,
        }
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn format_for(accept: &str) -> ResponseFormat {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(accept).unwrap());
        ResponseFormat::from_headers(&headers)
    }

    #[test]
    fn defaults_to_html() {
        assert_eq!(
            ResponseFormat::from_headers(&HeaderMap::new()),
            ResponseFormat::Html
        );
        assert_eq!(format_for("*/*"), ResponseFormat::Html);
    }

    #[test]
    fn browser_accept_header_gets_html() {
        assert_eq!(
            format_for("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
            ResponseFormat::Html
        );
    }

    #[test]
    fn api_clients_get_json() {
        assert_eq!(format_for("application/json"), ResponseFormat::Json);
        assert_eq!(
            format_for("application/json, text/html;q=0.5"),
            ResponseFormat::Json
        );
    }

    #[test]
    fn zero_quality_json_is_ignored() {
        assert_eq!(format_for("application/json;q=0"), ResponseFormat::Html);
        assert_eq!(
            format_for("text/html, application/json"),
            ResponseFormat::Html
        );
    }
}
