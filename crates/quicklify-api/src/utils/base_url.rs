//! Resolution of the externally visible origin used in returned links

use http::uri::Authority;
use http::{HeaderMap, Uri};
use quicklify_core::Config;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Origin (`scheme://host[:port]`) that links to stored files are built on.
///
/// A configured `PUBLIC_BASE_URL` always wins. Otherwise the origin is derived from
/// the request; forwarding headers are only consulted when proxies are trusted.
pub fn resolve_base_origin(config: &Config, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(base) = &config.public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let trust_proxy = config.trust_proxy_headers;
    let scheme = request_scheme(headers, uri, trust_proxy);
    let host = request_host(headers, uri, trust_proxy).unwrap_or_else(|| {
        tracing::debug!("No usable host in request, falling back to localhost");
        format!("localhost:{}", config.server_port)
    });

    format!("{}://{}", scheme, host)
}

fn request_scheme(headers: &HeaderMap, uri: &Uri, trust_proxy: bool) -> &'static str {
    if trust_proxy {
        if let Some(proto) = first_header_value(headers, X_FORWARDED_PROTO) {
            if proto.eq_ignore_ascii_case("https") {
                return "https";
            }
            if proto.eq_ignore_ascii_case("http") {
                return "http";
            }
        }
    }

    match uri.scheme_str() {
        Some(scheme) if scheme.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}

fn request_host(headers: &HeaderMap, uri: &Uri, trust_proxy: bool) -> Option<String> {
    let forwarded = trust_proxy
        .then(|| first_header_value(headers, X_FORWARDED_HOST))
        .flatten();

    // HTTP/2 requests carry the authority in the URI instead of a Host header.
    let candidate = forwarded
        .or_else(|| {
            headers
                .get(http::header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))?;

    validate_host(&candidate)
}

/// Accept only a bare `host[:port]` authority; userinfo and junk are refused.
fn validate_host(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.contains('@') {
        return None;
    }
    match candidate.parse::<Authority>() {
        Ok(authority) => Some(authority.as_str().to_ascii_lowercase()),
        Err(e) => {
            tracing::warn!(host = %candidate, error = %e, "Ignoring invalid host header");
            None
        }
    }
}

fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
