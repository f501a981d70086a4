//! Error types module
//!
//! Every way an upload can fail is a variant of `AppError`. The variant carries
//! the detailed cause for server-side logs; `ErrorMetadata` describes how it is
//! presented to the client (status, machine-readable code, terse message).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors caused by the client
    Debug,
    /// Warning level - for suspicious but recoverable input
    Warn,
    /// Error level - for unexpected server-side failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (never includes the underlying cause)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients even outside production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing file: {0}")]
    MissingFile(String),

    #[error("Upload transport error: {0}")]
    Transport(String),

    #[error("Unsupported content type: {detected}")]
    UnsupportedType { detected: String },

    #[error("File too large: more than {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl AppError {
    /// Short name of the variant, used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingFile(_) => "MissingFile",
            AppError::Transport(_) => "TransportError",
            AppError::UnsupportedType { .. } => "UnsupportedType",
            AppError::TooLarge { .. } => "TooLarge",
            AppError::StorageWrite(_) => "StorageWriteError",
        }
    }

    /// Full message including the cause, for logs and non-production responses.
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::MissingFile(_) => (400, "MISSING_FILE", false, LogLevel::Debug),
        AppError::Transport(_) => (400, "TRANSPORT_ERROR", false, LogLevel::Warn),
        AppError::UnsupportedType { .. } => (415, "UNSUPPORTED_TYPE", false, LogLevel::Debug),
        AppError::TooLarge { .. } => (413, "TOO_LARGE", false, LogLevel::Debug),
        AppError::StorageWrite(_) => (500, "STORAGE_WRITE_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile(_) => "No file.".to_string(),
            AppError::Transport(_) => "Upload error.".to_string(),
            AppError::UnsupportedType { .. } => "Only images allowed.".to_string(),
            AppError::TooLarge { limit } => format!("Max {}.", format_size_limit(*limit)),
            AppError::StorageWrite(_) => "Failed to save file.".to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

/// Render a byte limit the way users think about it: `5MB`, `512KB`, `1000 bytes`.
pub fn format_size_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_match_rejection_texts() {
        assert_eq!(
            AppError::MissingFile("no part".into()).client_message(),
            "No file."
        );
        assert_eq!(
            AppError::Transport("eof".into()).client_message(),
            "Upload error."
        );
        assert_eq!(
            AppError::UnsupportedType {
                detected: "text/plain".into()
            }
            .client_message(),
            "Only images allowed."
        );
        assert_eq!(
            AppError::TooLarge {
                limit: 5 * 1024 * 1024
            }
            .client_message(),
            "Max 5MB."
        );
        assert_eq!(
            AppError::StorageWrite("disk full".into()).client_message(),
            "Failed to save file."
        );
    }

    #[test]
    fn client_message_never_leaks_cause() {
        let err = AppError::StorageWrite("/var/lib/quicklify/uploads: EACCES".into());
        assert!(!err.client_message().contains("EACCES"));
        assert!(err.detailed_message().contains("EACCES"));
        assert!(err.is_sensitive());
    }

    #[test]
    fn status_codes_split_client_and_server_faults() {
        assert_eq!(AppError::MissingFile(String::new()).http_status_code(), 400);
        assert_eq!(AppError::Transport(String::new()).http_status_code(), 400);
        assert_eq!(
            AppError::UnsupportedType {
                detected: String::new()
            }
            .http_status_code(),
            415
        );
        assert_eq!(AppError::TooLarge { limit: 1 }.http_status_code(), 413);
        assert_eq!(AppError::StorageWrite(String::new()).http_status_code(), 500);
        assert_eq!(
            AppError::StorageWrite(String::new()).log_level(),
            LogLevel::Error
        );
    }

    #[test]
    fn format_size_limit_picks_largest_exact_unit() {
        assert_eq!(format_size_limit(5 * 1024 * 1024), "5MB");
        assert_eq!(format_size_limit(512 * 1024), "512KB");
        assert_eq!(format_size_limit(1000), "1000 bytes");
        assert_eq!(format_size_limit(1024 * 1024 + 1), "1048577 bytes");
    }
}
