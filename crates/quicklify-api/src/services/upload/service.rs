//! Image upload service
//!
//! Runs the upload pipeline: prepare dirs → receive → check type → check size →
//! name → persist. Validation happens before anything touches the upload
//! directory; a rejected upload only ever lived in a staging file, which is
//! removed when it is dropped.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Multipart;
use quicklify_core::{AppError, StoredImage};
use quicklify_storage::naming::generate_filename;

use crate::state::AppState;
use crate::utils::upload::{
    receive_image_part, resolve_extension, validate_file_size, validate_image_kind,
};

pub struct ImageUploadService {
    state: Arc<AppState>,
}

impl ImageUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store the `image` part of a multipart request under a fresh unique name.
    pub async fn upload(&self, mut multipart: Multipart) -> Result<StoredImage, AppError> {
        let config = &self.state.config;
        let storage = self.state.storage.as_ref();
        let limit = config.max_file_size_bytes;
        let started = Instant::now();

        storage.ensure_dirs().await?;

        let received = receive_image_part(&mut multipart, storage, limit).await?;

        // Type is checked first: a large non-image is reported as the wrong type.
        let kind = match validate_image_kind(&received.head) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::debug!(
                    original_filename = %received.original_filename,
                    "Rejected upload with unrecognized content"
                );
                return Err(e);
            }
        };
        validate_file_size(&received, limit)?;

        let extension = resolve_extension(
            config.extension_policy,
            &received.original_filename,
            kind,
        );
        let filename = generate_filename(&config.filename_prefix, &extension);
        let size_bytes = received.staged.len();

        let path = storage.persist(received.staged, &filename).await?;

        tracing::info!(
            filename = %filename,
            original_filename = %received.original_filename,
            content_type = kind.mime_type(),
            size_bytes = size_bytes,
            duration_ms = started.elapsed().as_millis() as u64,
            "Image stored"
        );

        Ok(StoredImage {
            filename,
            path,
            size_bytes,
            kind,
        })
    }
}
