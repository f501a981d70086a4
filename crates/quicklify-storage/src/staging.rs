//! Staging files for in-flight uploads

use tempfile::TempPath;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{StorageError, StorageResult};

/// Mode applied to a staged file before it is persisted (readable, never executable).
#[cfg(unix)]
const STORED_FILE_MODE: u32 = 0o644;

/// A temporary file receiving the bytes of one upload.
///
/// Dropping a `StagedFile` (or the path returned by [`StagedFile::finish`]) deletes
/// it from disk.
pub struct StagedFile {
    file: fs::File,
    path: TempPath,
    written: u64,
}

impl StagedFile {
    /// Wrap an open temporary file and the guard that deletes it.
    pub fn from_parts(file: std::fs::File, path: TempPath) -> Self {
        Self {
            file: fs::File::from_std(file),
            path,
            written: 0,
        }
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        self.file.write_all(chunk).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to write staging file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Bytes written so far
    pub fn len(&self) -> u64 {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Flush and sync the file, close the handle, and hand back the deleting path guard.
    pub async fn finish(mut self) -> StorageResult<TempPath> {
        self.file.flush().await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to flush staging file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        self.file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to sync staging file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                &self.path,
                std::fs::Permissions::from_mode(STORED_FILE_MODE),
            )
            .await?;
        }

        let StagedFile { file, path, .. } = self;
        drop(file);
        Ok(path)
    }
}

impl std::fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedFile")
            .field("path", &self.path.display())
            .field("written", &self.written)
            .finish()
    }
}
