//! Image upload service

mod service;
mod types;

pub use service::ImageUploadService;
pub use types::UploadResponse;
