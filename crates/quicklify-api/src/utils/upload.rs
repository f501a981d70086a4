//! Common utilities for the upload handler

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use http::StatusCode;
use quicklify_core::constants::{IMAGE_FIELD_NAME, SNIFF_LEN};
use quicklify_core::{AppError, ExtensionPolicy, ImageKind};
use quicklify_storage::{StagedFile, Storage};

/// Longest client extension kept under `ExtensionPolicy::Client`.
const MAX_CLIENT_EXTENSION_LEN: usize = 10;

/// The `image` part after it has been streamed to a staging file.
#[derive(Debug)]
pub struct ReceivedFile {
    pub staged: StagedFile,
    pub original_filename: String,
    /// Leading bytes of the file, for content sniffing
    pub head: Vec<u8>,
    /// Set when the part exceeded the size limit; reading stopped at that point
    pub oversized: bool,
}

/// Map a multipart failure: a tripped body limit is a size problem, anything else
/// is a transport problem.
pub fn multipart_error(err: MultipartError, limit: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge { limit }
    } else {
        AppError::Transport(err.body_text())
    }
}

/// Locate the first `image` file part and stream it into a staging file.
///
/// Parts with other names are skipped. A part named `image` with no filename is
/// not a file and counts as missing. A part with an empty filename and no bytes
/// (a form submitted without choosing a file) is a failed upload. At most
/// `limit + 1` bytes are consumed from the part.
pub async fn receive_image_part(
    multipart: &mut Multipart,
    storage: &dyn Storage,
    limit: u64,
) -> Result<ReceivedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(IMAGE_FIELD_NAME) {
            continue;
        }

        let Some(original_filename) = field.file_name().map(str::to_string) else {
            return Err(AppError::MissingFile(format!(
                "part '{}' is not a file",
                IMAGE_FIELD_NAME
            )));
        };

        let received = stream_field(field, original_filename, storage, limit).await?;
        let nothing_chosen = received.original_filename.is_empty()
            && received.staged.is_empty()
            && !received.oversized;
        if nothing_chosen {
            return Err(AppError::Transport(format!(
                "part '{}' was submitted without a file",
                IMAGE_FIELD_NAME
            )));
        }
        return Ok(received);
    }

    Err(AppError::MissingFile(format!(
        "no part named '{}'",
        IMAGE_FIELD_NAME
    )))
}

async fn stream_field(
    mut field: Field<'_>,
    original_filename: String,
    storage: &dyn Storage,
    limit: u64,
) -> Result<ReceivedFile, AppError> {
    let mut staged = storage.stage().await?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    let mut received: u64 = 0;
    let mut oversized = false;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if head.len() < SNIFF_LEN {
            let take = (SNIFF_LEN - head.len()).min(chunk.len());
            head.extend_from_slice(&chunk[..take]);
        }

        received += chunk.len() as u64;
        if received > limit {
            oversized = true;
            break;
        }

        staged.write_chunk(&chunk).await?;
    }

    Ok(ReceivedFile {
        staged,
        original_filename,
        head,
        oversized,
    })
}

/// Validate the sniffed content type against the accepted image kinds.
pub fn validate_image_kind(head: &[u8]) -> Result<ImageKind, AppError> {
    ImageKind::sniff(head).ok_or_else(|| AppError::UnsupportedType {
        detected: ImageKind::describe(head),
    })
}

/// Validate file size (the limit is inclusive)
pub fn validate_file_size(file: &ReceivedFile, limit: u64) -> Result<(), AppError> {
    if file.oversized || file.staged.len() > limit {
        return Err(AppError::TooLarge { limit });
    }
    Ok(())
}

/// Choose the extension of the stored file.
pub fn resolve_extension(
    policy: ExtensionPolicy,
    original_filename: &str,
    kind: ImageKind,
) -> String {
    match policy {
        ExtensionPolicy::Sniffed => kind.canonical_extension().to_string(),
        ExtensionPolicy::Client => client_extension(original_filename)
            .unwrap_or_else(|| kind.canonical_extension().to_string()),
    }
}

/// Lower-cased extension of a client filename, if it is a short alphanumeric token.
fn client_extension(original_filename: &str) -> Option<String> {
    // Browsers on Windows may send a full path; only the last component matters.
    let name = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_filename);

    let extension = Path::new(name).extension()?.to_str()?.to_lowercase();
    let valid = !extension.is_empty()
        && extension.len() <= MAX_CLIENT_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(extension)
}
