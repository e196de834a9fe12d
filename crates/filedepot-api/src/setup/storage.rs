//! Storage setup and initialization

use anyhow::Result;
use filedepot_core::{Config, StorageBackend};
use filedepot_storage::{create_local_storage, create_storage, resolve_backend, FileStorage, LocalFileStorage};
use std::sync::Arc;

/// Setup storage; when the local backend is active, also return a concrete
/// handle for the byte-transfer routes that stand in for an object store.
/// Both handles point at the same instance.
pub async fn setup_storage(
    config: &Config,
) -> Result<(Arc<dyn FileStorage>, Option<Arc<LocalFileStorage>>)> {
    tracing::info!("Initializing storage abstraction...");

    let (storage, local_files): (Arc<dyn FileStorage>, Option<Arc<LocalFileStorage>>) =
        match resolve_backend(config) {
            StorageBackend::Local => {
                let local = create_local_storage(config).await?;
                (local.clone(), Some(local))
            }
            _ => (create_storage(config).await?, None),
        };

    tracing::info!(
        backend = ?storage.backend_type(),
        "Storage abstraction initialized successfully"
    );

    Ok((storage, local_files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedepot_core::FileServiceConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_backend_shares_one_instance() {
        let dir = tempdir().unwrap();
        let config = Config(Box::new(FileServiceConfig {
            server_port: 8005,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            storage_backend: None,
            local_storage_path: dir.path().to_string_lossy().into_owned(),
            file_base_url: "http://localhost:8005/files".to_string(),
            upload_url_ttl_secs: 900,
            max_file_size_bytes: 1024,
        }));

        let (storage, local_files) = setup_storage(&config).await.unwrap();
        let local = local_files.expect("local backend active");

        // The trait object and the concrete handle must be the same allocation.
        assert!(std::ptr::eq(
            Arc::as_ptr(&storage) as *const (),
            Arc::as_ptr(&local) as *const ()
        ));
    }
}
