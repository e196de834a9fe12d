use crate::{FileStorage, LocalFileStorage, StorageBackend, StorageResult};
use filedepot_core::Config;
use std::sync::Arc;

/// Resolve the configured backend to the one that will actually serve.
///
/// `s3` and `minio` are accepted configuration values but have no
/// implementation yet; they fall back to the local backend with a warning
/// rather than silently misbehaving.
pub fn resolve_backend(config: &Config) -> StorageBackend {
    let requested = config.storage_backend().unwrap_or(StorageBackend::Local);

    match requested {
        StorageBackend::Local => StorageBackend::Local,
        StorageBackend::S3 | StorageBackend::Minio => {
            tracing::warn!(
                requested = %requested,
                "Storage backend not implemented yet, falling back to local filesystem"
            );
            StorageBackend::Local
        }
    }
}

/// Construct the local backend from configuration. Callers that need the
/// concrete type (for byte routes) share this one instance with the trait
/// object instead of building a second backend over the same directory.
pub async fn create_local_storage(config: &Config) -> StorageResult<Arc<LocalFileStorage>> {
    let storage = LocalFileStorage::new(
        config.local_storage_path(),
        config.file_base_url().to_string(),
    )
    .await?;
    Ok(Arc::new(storage))
}

/// Create a storage backend based on configuration
///
/// The registry below maps each resolved backend to its constructor.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn FileStorage>> {
    match resolve_backend(config) {
        StorageBackend::Local => {
            let storage = create_local_storage(config).await?;
            Ok(storage as Arc<dyn FileStorage>)
        }
        // Unreachable today; kept so adding a real backend forces a decision here.
        other => Err(crate::StorageError::ConfigError(format!(
            "no constructor registered for backend: {}",
            other
        ))),
    }
}
