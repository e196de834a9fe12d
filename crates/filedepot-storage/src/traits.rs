//! Storage abstraction trait
//!
//! This module defines the FileStorage trait that all storage backends must
//! implement.

use async_trait::async_trait;
use filedepot_core::models::{FileMetadata, UploadCredential};
use filedepot_core::StorageBackend;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("credential issuance failed: {0}")]
    CredentialIssuance(String),

    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("invalid file id: {0}")]
    InvalidKey(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (local filesystem, S3-compatible stores) must
/// implement this trait. The upload coordinator works against it without
/// coupling to backend details; the backend exclusively owns the durable
/// representation of every file.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Issue an upload credential for the given file ID.
    ///
    /// Deterministic given the same backend configuration and inputs, apart
    /// from backend-generated signature material. The local backend creates
    /// the per-file directory here so the out-of-band upload has a target.
    async fn generate_presigned_url(
        &self,
        file_id: &str,
        file_name: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<UploadCredential>;

    /// Public/download URL for a file. Pure derivation from configuration
    /// and the file ID; no I/O.
    fn file_url(&self, file_id: &str) -> String;

    /// Verify that the out-of-band upload for `file_id` actually happened.
    ///
    /// Fails with `NotFound` when there is no backing object. Directory
    /// existence alone is not enough; the backend must see evidence of a
    /// completed transfer.
    async fn confirm_upload(&self, file_id: &str) -> StorageResult<()>;

    /// Fetch the metadata recoverable from the storage medium.
    ///
    /// Fails with `NotFound` if the file ID has no backing entry. Fields the
    /// medium cannot recover (content type for the local backend) come back
    /// empty.
    async fn get_file_info(&self, file_id: &str) -> StorageResult<FileMetadata>;

    /// Delete a file. Idempotent: deleting a non-existent file ID is Ok.
    async fn delete_file(&self, file_id: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
