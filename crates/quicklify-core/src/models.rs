//! Domain models shared by storage and API

use std::fmt;
use std::path::PathBuf;

use image::ImageFormat;
use serde::Serialize;

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageKind {
    pub const ALL: [ImageKind; 4] = [
        ImageKind::Png,
        ImageKind::Jpeg,
        ImageKind::Webp,
        ImageKind::Gif,
    ];

    /// Detect the image kind from the leading bytes of a file.
    ///
    /// Only magic numbers are inspected; client-declared names and headers play
    /// no part. Returns `None` for anything outside the accepted set.
    pub fn sniff(head: &[u8]) -> Option<Self> {
        match image::guess_format(head).ok()? {
            ImageFormat::Png => Some(ImageKind::Png),
            ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            ImageFormat::WebP => Some(ImageKind::Webp),
            ImageFormat::Gif => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// Best-effort description of what the bytes look like, for rejection logs.
    pub fn describe(head: &[u8]) -> String {
        match image::guess_format(head) {
            Ok(format) => format.to_mime_type().to_string(),
            Err(_) if head.is_empty() => "empty".to_string(),
            Err(_) if std::str::from_utf8(head).is_ok() => "text/plain".to_string(),
            Err(_) => "application/octet-stream".to_string(),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Webp => "image/webp",
            ImageKind::Gif => "image/gif",
        }
    }

    /// Fixed extension used for stored files of this kind.
    pub fn canonical_extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
            ImageKind::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// A file that has been persisted into the upload directory.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Generated unique name, including extension
    pub filename: String,
    /// Absolute or configured path of the stored file
    pub path: PathBuf,
    pub size_bytes: u64,
    pub kind: ImageKind,
}

impl StoredImage {
    /// Public URL of the file: `<base_origin><url_path>/<filename>`.
    pub fn url(&self, base_origin: &str, url_path: &str) -> String {
        format!(
            "{}/{}/{}",
            base_origin.trim_end_matches('/'),
            url_path.trim_matches('/'),
            self.filename
        )
    }
}
