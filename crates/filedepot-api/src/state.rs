//! Application state shared across handlers.

use filedepot_core::Config;
use filedepot_services::FileUploadService;
use filedepot_storage::{FileStorage, LocalFileStorage};
use std::sync::Arc;

/// Main application state: configuration plus the upload coordinator and its
/// storage backend.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: Arc<FileUploadService>,
    pub storage: Arc<dyn FileStorage>,
    /// Present only when the local backend is active; serves the byte-transfer
    /// routes that stand in for a real object store during development.
    pub local_files: Option<Arc<LocalFileStorage>>,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
