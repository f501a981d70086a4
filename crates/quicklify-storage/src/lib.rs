//! Quicklify Storage Library
//!
//! This crate provides the `Storage` abstraction and the local filesystem backend.
//!
//! # Write protocol
//!
//! Uploads never write into the upload directory directly. Bytes are streamed into
//! a staging file (`Storage::stage`) that lives on the same filesystem, and only a
//! fully written, synced file is moved into place with a no-clobber rename
//! (`Storage::persist`). A staging file that is dropped before being persisted is
//! deleted, so rejected uploads leave nothing behind.
//!
//! # Naming
//!
//! Stored names are `<prefix>_<time-hex><random-hex>.<ext>`; see the `naming` module.

pub mod factory;
pub mod local;
pub mod naming;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use staging::StagedFile;
pub use traits::{Storage, StorageError, StorageResult};
