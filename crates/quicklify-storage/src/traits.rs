//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quicklify_core::AppError;
use thiserror::Error;

use crate::staging::StagedFile;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to prepare directory {path}: {reason}")]
    DirectoryFailed { path: PathBuf, reason: String },

    #[error("Staging failed: {0}")]
    StagingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Persist failed: {0}")]
    PersistFailed(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

// Every storage failure on the upload path surfaces to clients as a failed save.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::StorageWrite(err.to_string())
    }
}

/// Storage abstraction trait
///
/// The upload service only talks to this trait, which keeps the request path
/// independent of where files end up and lets tests substitute failing backends.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the upload and staging directories if missing.
    ///
    /// Idempotent and safe to call from concurrent requests.
    async fn ensure_dirs(&self) -> StorageResult<()>;

    /// Open a new staging file for an incoming upload.
    async fn stage(&self) -> StorageResult<StagedFile>;

    /// Atomically move a fully written staging file to `filename` in the upload
    /// directory. Fails instead of overwriting an existing file.
    ///
    /// Returns the path of the stored file.
    async fn persist(&self, staged: StagedFile, filename: &str) -> StorageResult<PathBuf>;

    /// Directory stored files live in
    fn root(&self) -> &Path;
}
