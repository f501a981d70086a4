use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::naming::is_valid_filename;
use crate::staging::StagedFile;
use crate::traits::{Storage, StorageError, StorageResult};

/// Directory mode: owner and group may read/write/list, others may read/list.
#[cfg(unix)]
const DIR_MODE: u32 = 0o775;

const STAGING_PREFIX: &str = ".incoming-";
const STAGING_SUFFIX: &str = ".part";

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    upload_dir: PathBuf,
    staging_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance and make sure both directories exist.
    ///
    /// # Arguments
    /// * `upload_dir` - Directory accepted files are moved into (e.g., "uploads")
    /// * `staging_dir` - Scratch directory on the same filesystem for in-flight uploads
    pub async fn new(
        upload_dir: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
    ) -> StorageResult<Self> {
        let storage = LocalStorage {
            upload_dir: upload_dir.into(),
            staging_dir: staging_dir.into(),
        };
        storage.ensure_dirs().await?;
        Ok(storage)
    }

    /// Resolve a stored file name to its path, refusing anything that is not a plain name.
    fn name_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if !is_valid_filename(filename) {
            return Err(StorageError::InvalidName(filename.to_string()));
        }
        Ok(self.upload_dir.join(filename))
    }

    async fn create_dir(path: &Path) -> StorageResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);

        builder
            .create(path)
            .await
            .map_err(|e| StorageError::DirectoryFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn ensure_dirs(&self) -> StorageResult<()> {
        Self::create_dir(&self.upload_dir).await?;
        Self::create_dir(&self.staging_dir).await
    }

    async fn stage(&self) -> StorageResult<StagedFile> {
        let staging_dir = self.staging_dir.clone();

        let named = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(STAGING_PREFIX)
                .suffix(STAGING_SUFFIX)
                .tempfile_in(&staging_dir)
        })
        .await
        .map_err(|e| StorageError::StagingFailed(format!("Staging task failed: {}", e)))?
        .map_err(|e| {
            StorageError::StagingFailed(format!(
                "Failed to create staging file in {}: {}",
                self.staging_dir.display(),
                e
            ))
        })?;

        let (file, path) = named.into_parts();
        tracing::debug!(path = %path.display(), "Staging file created");
        Ok(StagedFile::from_parts(file, path))
    }

    async fn persist(&self, staged: StagedFile, filename: &str) -> StorageResult<PathBuf> {
        let target = self.name_to_path(filename)?;
        let size = staged.len();
        let start = std::time::Instant::now();

        let temp_path = staged.finish().await?;

        let destination = target.clone();
        tokio::task::spawn_blocking(move || temp_path.persist_noclobber(&destination))
            .await
            .map_err(|e| StorageError::PersistFailed(format!("Persist task failed: {}", e)))?
            .map_err(|e| {
                // The returned path guard is dropped here, removing the staging file.
                StorageError::PersistFailed(format!(
                    "Failed to move upload to {}: {}",
                    target.display(),
                    e.error
                ))
            })?;

        tracing::info!(
            path = %target.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage persist successful"
        );

        Ok(target)
    }

    fn root(&self) -> &Path {
        &self.upload_dir
    }
}
