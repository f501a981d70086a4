//! Shared constants

/// Multipart field that carries the uploaded image.
pub const IMAGE_FIELD_NAME: &str = "image";

/// Default inclusive upload limit (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Default hard request-body cap, as a multiple of the file limit.
pub const DEFAULT_BODY_LIMIT_MULTIPLIER: u64 = 4;

/// Room the request body needs beyond the file itself for boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Prefix of generated filenames.
pub const DEFAULT_FILENAME_PREFIX: &str = "qlfy";

/// Public path segment under which stored files are served.
pub const DEFAULT_UPLOAD_URL_PATH: &str = "/uploads";

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Number of leading bytes kept for content sniffing.
pub const SNIFF_LEN: usize = 512;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 1024;
