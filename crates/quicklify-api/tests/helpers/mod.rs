//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p quicklify-api`.

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use quicklify_api::setup::routes;
use quicklify_api::state::AppState;
use quicklify_core::Config;
use quicklify_storage::{LocalStorage, StagedFile, Storage, StorageError, StorageResult};
use tempfile::TempDir;

/// Public origin configured for tests, so returned links are deterministic.
pub const TEST_BASE_URL: &str = "http://img.test";

pub const FIVE_MIB: usize = 5 * 1024 * 1024;

/// Test application: server plus the temporary directory backing storage.
pub struct TestApp {
    pub server: TestServer,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    /// Names of all files in the upload directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        list_files(&self.config.upload_dir)
    }

    /// Names of all leftover files in the staging directory.
    pub fn staged_files(&self) -> Vec<String> {
        list_files(&self.config.staging_dir)
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Configuration rooted in `root`, with a fixed public base URL.
pub fn create_test_config(root: &Path) -> Config {
    Config {
        upload_dir: root.join("uploads"),
        staging_dir: root.join(".uploads-staging"),
        public_base_url: Some(TEST_BASE_URL.to_string()),
        ..Config::default()
    }
}

/// Setup test app with local storage in a fresh temporary directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust the configuration first.
pub async fn setup_test_app_with(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = create_test_config(temp_dir.path());
    adjust(&mut config);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&config.upload_dir, &config.staging_dir)
            .await
            .expect("Failed to create local storage"),
    );

    build_test_app(config, storage, temp_dir)
}

/// Setup test app on top of an arbitrary storage backend.
pub fn build_test_app(config: Config, storage: Arc<dyn Storage>, temp_dir: TempDir) -> TestApp {
    let state = Arc::new(AppState::new(config.clone(), storage));
    let app = routes::build_router(&config, state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        config,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with a single file in the `image` field.
pub fn image_form(bytes: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(bytes))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("image", part)
}

/// Storage that stages normally but fails every persist, as a full or read-only disk would.
pub struct FailingStorage {
    inner: LocalStorage,
}

impl FailingStorage {
    pub async fn new(upload_dir: PathBuf, staging_dir: PathBuf) -> Self {
        Self {
            inner: LocalStorage::new(upload_dir, staging_dir)
                .await
                .expect("Failed to create local storage"),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn ensure_dirs(&self) -> StorageResult<()> {
        self.inner.ensure_dirs().await
    }

    async fn stage(&self) -> StorageResult<StagedFile> {
        self.inner.stage().await
    }

    async fn persist(&self, _staged: StagedFile, _filename: &str) -> StorageResult<PathBuf> {
        Err(StorageError::PersistFailed(
            "No space left on device".to_string(),
        ))
    }

    fn root(&self) -> &Path {
        self.inner.root()
    }
}
