//! Application state shared by all handlers.

use std::sync::Arc;

use quicklify_core::Config;
use quicklify_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }
}
