//! Configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file). Every value has a default except `PUBLIC_BASE_URL`, which is
//! optional: without it the public origin is derived from request headers.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;

use crate::constants::{
    DEFAULT_BODY_LIMIT_MULTIPLIER, DEFAULT_FILENAME_PREFIX, DEFAULT_HTTP_CONCURRENCY_LIMIT,
    DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_PORT, DEFAULT_UPLOAD_DIR, DEFAULT_UPLOAD_TIMEOUT_SECS,
    DEFAULT_UPLOAD_URL_PATH, MULTIPART_OVERHEAD_BYTES,
};

/// How the extension of a stored file is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Fixed extension derived from the sniffed content type.
    Sniffed,
    /// Lower-cased extension of the client filename, falling back to the sniffed one.
    Client,
}

impl FromStr for ExtensionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sniffed" => Ok(ExtensionPolicy::Sniffed),
            "client" => Ok(ExtensionPolicy::Client),
            other => Err(anyhow::anyhow!(
                "EXTENSION_POLICY must be 'sniffed' or 'client', got '{}'",
                other
            )),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Directory accepted files are persisted into
    pub upload_dir: PathBuf,
    /// Scratch directory for in-flight uploads; must share a filesystem with `upload_dir`
    pub staging_dir: PathBuf,
    /// Public path segment stored files are served under, e.g. `/uploads`
    pub upload_url_path: String,
    pub filename_prefix: String,
    /// Inclusive upload size limit
    pub max_file_size_bytes: u64,
    /// Hard cap on the whole request body
    pub max_request_body_bytes: usize,
    pub extension_policy: ExtensionPolicy,
    pub public_base_url: Option<String>,
    pub trust_proxy_headers: bool,
    pub upload_timeout_secs: u64,
    pub http_concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let upload_dir = PathBuf::from(DEFAULT_UPLOAD_DIR);
        Self {
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            staging_dir: default_staging_dir(&upload_dir),
            upload_dir,
            upload_url_path: DEFAULT_UPLOAD_URL_PATH.to_string(),
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_request_body_bytes: default_body_limit(DEFAULT_MAX_FILE_SIZE_BYTES),
            extension_policy: ExtensionPolicy::Sniffed,
            public_base_url: None,
            trust_proxy_headers: false,
            upload_timeout_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
            http_concurrency_limit: DEFAULT_HTTP_CONCURRENCY_LIMIT,
        }
    }
}

/// Body cap derived from the file limit, never below the file plus multipart overhead.
pub fn default_body_limit(max_file_size_bytes: u64) -> usize {
    max_file_size_bytes
        .saturating_mul(DEFAULT_BODY_LIMIT_MULTIPLIER)
        .max(max_file_size_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)) as usize
}

/// Staging directory placed next to the upload directory, so renames stay on one filesystem.
pub fn default_staging_dir(upload_dir: &Path) -> PathBuf {
    let name = upload_dir
        .file_name()
        .map(|n| format!(".{}-staging", n.to_string_lossy()))
        .unwrap_or_else(|| ".uploads-staging".to_string());
    upload_dir.with_file_name(name)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);
        let staging_dir = lookup("UPLOAD_STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_staging_dir(&upload_dir));

        let max_file_size_bytes: u64 = parse_or(
            &lookup,
            "MAX_FILE_SIZE_BYTES",
            defaults.max_file_size_bytes,
        )?;
        let max_request_body_bytes: usize = parse_or(
            &lookup,
            "MAX_REQUEST_BODY_BYTES",
            default_body_limit(max_file_size_bytes),
        )?;

        let extension_policy = match lookup("EXTENSION_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.extension_policy,
        };

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let trust_proxy_headers = lookup("TRUST_PROXY_HEADERS")
            .map(|s| s.trim().to_lowercase())
            .map(|s| s == "true" || s == "1")
            .unwrap_or(defaults.trust_proxy_headers);

        Ok(Config {
            server_port: parse_or(&lookup, "PORT", defaults.server_port)?,
            environment,
            upload_dir,
            staging_dir,
            upload_url_path: lookup("UPLOAD_URL_PATH")
                .map(|s| format!("/{}", s.trim().trim_matches('/')))
                .unwrap_or(defaults.upload_url_path),
            filename_prefix: lookup("UPLOAD_FILENAME_PREFIX")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.filename_prefix),
            max_file_size_bytes,
            max_request_body_bytes,
            extension_policy,
            public_base_url,
            trust_proxy_headers,
            upload_timeout_secs: parse_or(
                &lookup,
                "UPLOAD_TIMEOUT_SECS",
                defaults.upload_timeout_secs,
            )?,
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                defaults.http_concurrency_limit,
            )?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be greater than 0"));
        }

        let min_body = self
            .max_file_size_bytes
            .saturating_add(MULTIPART_OVERHEAD_BYTES);
        if (self.max_request_body_bytes as u64) < min_body {
            return Err(anyhow::anyhow!(
                "MAX_REQUEST_BODY_BYTES ({}) must be at least MAX_FILE_SIZE_BYTES plus {} bytes of multipart overhead ({})",
                self.max_request_body_bytes,
                MULTIPART_OVERHEAD_BYTES,
                min_body
            ));
        }

        if self.filename_prefix.is_empty()
            || !self
                .filename_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(anyhow::anyhow!(
                "UPLOAD_FILENAME_PREFIX must be non-empty and contain only ASCII letters, digits or '-'"
            ));
        }

        let path = self.upload_url_path.trim_matches('/');
        if path.is_empty() || path.contains("..") {
            return Err(anyhow::anyhow!(
                "UPLOAD_URL_PATH must be a non-root path such as '/uploads'"
            ));
        }

        if self.upload_dir == self.staging_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_STAGING_DIR must differ from UPLOAD_DIR"
            ));
        }

        if let Some(base) = &self.public_base_url {
            let uri: http::Uri = base
                .parse()
                .with_context(|| format!("PUBLIC_BASE_URL '{}' is not a valid URL", base))?;
            match uri.scheme_str() {
                Some("http") | Some("https") => {}
                _ => {
                    return Err(anyhow::anyhow!(
                        "PUBLIC_BASE_URL must start with http:// or https://"
                    ))
                }
            }
            if uri.authority().is_none() {
                return Err(anyhow::anyhow!("PUBLIC_BASE_URL must include a host"));
            }
        }

        if self.upload_timeout_secs == 0 {
            return Err(anyhow::anyhow!("UPLOAD_TIMEOUT_SECS must be at least 1"));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be at least 1"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", key, raw)),
        None => Ok(default),
    }
}
