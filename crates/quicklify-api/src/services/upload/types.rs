//! Types used by the image upload service

use quicklify_core::StoredImage;
use serde::Serialize;

/// JSON body returned for a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size_bytes: u64,
    pub content_type: &'static str,
}

impl UploadResponse {
    pub fn new(image: &StoredImage, url: String) -> Self {
        Self {
            url,
            filename: image.filename.clone(),
            size_bytes: image.size_bytes,
            content_type: image.kind.mime_type(),
        }
    }
}
