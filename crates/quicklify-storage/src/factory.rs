use std::sync::Arc;

use quicklify_core::Config;

use crate::{LocalStorage, Storage, StorageResult};

/// Create the storage backend described by the configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload_dir, &config.staging_dir).await?;

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        staging_dir = %config.staging_dir.display(),
        "Local storage ready"
    );

    Ok(Arc::new(storage))
}
