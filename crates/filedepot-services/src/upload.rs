//! Upload coordinator
//!
//! Drives the presigned-upload protocol: request a credential, let the client
//! transfer bytes out-of-band, confirm completion. The coordinator holds no
//! state between calls; the storage backend owns every durable fact about a
//! file, so there is no second source of truth to drift.

use chrono::Utc;
use filedepot_core::models::{FileMetadata, UploadCredential};
use filedepot_core::FileIdGenerator;
use filedepot_storage::{FileStorage, StorageError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default credential lifetime: 15 minutes. Bounds the exposure window of an
/// issued credential without needing a cleanup process for expired-but-unused
/// file IDs.
pub const DEFAULT_UPLOAD_TTL: Duration = Duration::from_secs(15 * 60);

/// Upload coordination errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to generate presigned URL: {0}")]
    CredentialIssuanceFailed(#[source] StorageError),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("failed to confirm upload: {0}")]
    UnconfirmedUpload(#[source] StorageError),

    #[error("storage backend error: {0}")]
    Backend(#[from] StorageError),
}

/// Coordinates the three-phase upload protocol and file lifecycle operations.
pub struct FileUploadService {
    storage: Arc<dyn FileStorage>,
    id_generator: Arc<dyn FileIdGenerator>,
    upload_ttl: Duration,
}

impl FileUploadService {
    pub fn new(storage: Arc<dyn FileStorage>, id_generator: Arc<dyn FileIdGenerator>) -> Self {
        FileUploadService {
            storage,
            id_generator,
            upload_ttl: DEFAULT_UPLOAD_TTL,
        }
    }

    /// Override the credential TTL (default 15 minutes).
    pub fn with_upload_ttl(mut self, ttl: Duration) -> Self {
        self.upload_ttl = ttl;
        self
    }

    /// Request an upload: generate a fresh file ID and issue a credential.
    ///
    /// The returned metadata is provisional. Name, content type, size, and
    /// description are caller-declared and not verified against the bytes the
    /// client eventually uploads. If issuance fails the file ID is discarded;
    /// a retry gets a new one.
    pub async fn request_upload(
        &self,
        file_name: &str,
        content_type: &str,
        file_size: i64,
        description: &str,
    ) -> Result<(FileMetadata, UploadCredential), UploadError> {
        if file_name.is_empty() {
            return Err(UploadError::InvalidArgument(
                "file_name is required".to_string(),
            ));
        }
        if content_type.is_empty() {
            return Err(UploadError::InvalidArgument(
                "content_type is required".to_string(),
            ));
        }

        let file_id = self.id_generator.generate();

        let credential = self
            .storage
            .generate_presigned_url(file_id.as_str(), file_name, content_type, self.upload_ttl)
            .await
            .map_err(UploadError::CredentialIssuanceFailed)?;

        let metadata = FileMetadata {
            file_id: file_id.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            file_size,
            description: description.to_string(),
            uploaded_at: Utc::now(),
            file_url: self.storage.file_url(file_id.as_str()),
        };

        tracing::info!(
            file_id = %file_id,
            file_name = %file_name,
            expires_in_secs = credential.expires_in,
            "Upload requested"
        );

        Ok((metadata, credential))
    }

    /// Confirm that the out-of-band transfer completed; returns the download
    /// URL on success. Never retries: if the transfer failed, the caller must
    /// request a fresh upload.
    pub async fn confirm_upload(&self, file_id: &str) -> Result<String, UploadError> {
        match self.storage.confirm_upload(file_id).await {
            Ok(()) => {
                let url = self.storage.file_url(file_id);
                tracing::info!(file_id = %file_id, file_url = %url, "Upload confirmed");
                Ok(url)
            }
            // A malformed ID can never have a backing object, so it reads the
            // same as a missing one from the caller's side.
            Err(StorageError::NotFound(msg)) => Err(UploadError::NotFound(msg)),
            Err(StorageError::InvalidKey(_)) => Err(UploadError::NotFound(file_id.to_string())),
            Err(e) => Err(UploadError::UnconfirmedUpload(e)),
        }
    }

    /// Fetch the metadata the storage medium can recover for a file ID.
    pub async fn get_file_info(&self, file_id: &str) -> Result<FileMetadata, UploadError> {
        match self.storage.get_file_info(file_id).await {
            Ok(info) => Ok(info),
            Err(StorageError::NotFound(msg)) => Err(UploadError::NotFound(msg)),
            Err(StorageError::InvalidKey(_)) => Err(UploadError::NotFound(file_id.to_string())),
            Err(e) => Err(UploadError::Backend(e)),
        }
    }

    /// Delete a file. Idempotent: unknown and malformed IDs are not errors.
    pub async fn delete_file(&self, file_id: &str) -> Result<(), UploadError> {
        match self.storage.delete_file(file_id).await {
            Ok(()) => Ok(()),
            Err(StorageError::NotFound(_)) | Err(StorageError::InvalidKey(_)) => Ok(()),
            Err(e) => Err(UploadError::Backend(e)),
        }
    }

    /// Download URL for a file ID. Pure derivation; no failure path.
    pub fn file_url(&self, file_id: &str) -> String {
        self.storage.file_url(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use filedepot_core::{FileId, StorageBackend};
    use filedepot_storage::StorageResult;
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::sync::Mutex;

    const BASE_URL: &str = "http://localhost:8005/files";

    /// In-memory stand-in for a storage backend: tracks which IDs have a
    /// credential issued and which have completed transfers.
    #[derive(Default)]
    struct MemoryStorage {
        requested: Mutex<HashSet<String>>,
        uploaded: Mutex<HashSet<String>>,
        fail_issuance: bool,
    }

    impl MemoryStorage {
        fn mark_uploaded(&self, file_id: &str) {
            self.uploaded.lock().unwrap().insert(file_id.to_string());
        }
    }

    #[async_trait]
    impl FileStorage for MemoryStorage {
        async fn generate_presigned_url(
            &self,
            file_id: &str,
            file_name: &str,
            content_type: &str,
            expires_in: Duration,
        ) -> StorageResult<UploadCredential> {
            if self.fail_issuance {
                return Err(StorageError::BackendUnavailable("backend down".to_string()));
            }
            self.requested.lock().unwrap().insert(file_id.to_string());

            let mut headers = HashMap::new();
            headers.insert("Content-Type".to_string(), content_type.to_string());
            Ok(UploadCredential {
                upload_url: format!("{}/upload/{}", BASE_URL, file_id),
                download_url: format!("{}/{}/{}", BASE_URL, file_id, file_name),
                method: "PUT".to_string(),
                headers,
                expires_in: expires_in.as_secs(),
            })
        }

        fn file_url(&self, file_id: &str) -> String {
            format!("{}/{}", BASE_URL, file_id)
        }

        async fn confirm_upload(&self, file_id: &str) -> StorageResult<()> {
            if FileId::parse(file_id).is_err() {
                return Err(StorageError::InvalidKey(file_id.to_string()));
            }
            if self.uploaded.lock().unwrap().contains(file_id) {
                Ok(())
            } else {
                Err(StorageError::NotFound(file_id.to_string()))
            }
        }

        async fn get_file_info(&self, file_id: &str) -> StorageResult<FileMetadata> {
            if !self.uploaded.lock().unwrap().contains(file_id) {
                return Err(StorageError::NotFound(file_id.to_string()));
            }
            Ok(FileMetadata {
                file_id: file_id.to_string(),
                file_name: String::new(),
                content_type: String::new(),
                file_size: 0,
                description: String::new(),
                uploaded_at: Utc::now(),
                file_url: self.file_url(file_id),
            })
        }

        async fn delete_file(&self, file_id: &str) -> StorageResult<()> {
            self.uploaded.lock().unwrap().remove(file_id);
            self.requested.lock().unwrap().remove(file_id);
            Ok(())
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn service(storage: Arc<MemoryStorage>) -> FileUploadService {
        FileUploadService::new(storage, Arc::new(filedepot_core::RandomFileIdGenerator))
    }

    #[tokio::test]
    async fn test_request_upload_returns_fresh_id_and_credential() {
        let storage = Arc::new(MemoryStorage::default());
        let service = service(storage.clone());

        let (metadata, credential) = service
            .request_upload("report.pdf", "application/pdf", 2048, "Q1 report")
            .await
            .unwrap();

        assert_eq!(metadata.file_id.len(), 32);
        assert!(metadata
            .file_id
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert_eq!(metadata.file_name, "report.pdf");
        assert_eq!(metadata.file_size, 2048);
        assert_eq!(metadata.description, "Q1 report");
        assert_eq!(credential.method, "PUT");
        assert_eq!(credential.expires_in, 900);
        assert_eq!(
            credential.headers.get("Content-Type").map(String::as_str),
            Some("application/pdf")
        );
        assert!(storage
            .requested
            .lock()
            .unwrap()
            .contains(&metadata.file_id));
    }

    #[tokio::test]
    async fn test_request_upload_ids_are_distinct() {
        let service = service(Arc::new(MemoryStorage::default()));

        let (a, _) = service
            .request_upload("a.txt", "text/plain", 1, "")
            .await
            .unwrap();
        let (b, _) = service
            .request_upload("b.txt", "text/plain", 1, "")
            .await
            .unwrap();
        assert_ne!(a.file_id, b.file_id);
    }

    #[tokio::test]
    async fn test_request_upload_rejects_missing_fields() {
        let service = service(Arc::new(MemoryStorage::default()));

        let result = service.request_upload("", "text/plain", 1, "").await;
        assert!(matches!(result, Err(UploadError::InvalidArgument(_))));

        let result = service.request_upload("a.txt", "", 1, "").await;
        assert!(matches!(result, Err(UploadError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_issuance_failure_propagates() {
        let storage = Arc::new(MemoryStorage {
            fail_issuance: true,
            ..Default::default()
        });
        let service = service(storage);

        let result = service.request_upload("a.txt", "text/plain", 1, "").await;
        assert!(matches!(
            result,
            Err(UploadError::CredentialIssuanceFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_confirm_round_trip() {
        let storage = Arc::new(MemoryStorage::default());
        let service = service(storage.clone());

        let (metadata, _) = service
            .request_upload("a.txt", "text/plain", 1, "")
            .await
            .unwrap();

        // No transfer yet: confirm must fail.
        let result = service.confirm_upload(&metadata.file_id).await;
        assert!(matches!(result, Err(UploadError::NotFound(_))));

        storage.mark_uploaded(&metadata.file_id);

        let url = service.confirm_upload(&metadata.file_id).await.unwrap();
        assert_eq!(url, format!("{}/{}", BASE_URL, metadata.file_id));
    }

    #[tokio::test]
    async fn test_confirm_malformed_id_reads_as_not_found() {
        let service = service(Arc::new(MemoryStorage::default()));

        let result = service.confirm_upload("nonexistent-id").await;
        match result {
            Err(UploadError::NotFound(msg)) => assert!(msg.contains("nonexistent-id")),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let storage = Arc::new(MemoryStorage::default());
        let service = service(storage.clone());

        let (metadata, _) = service
            .request_upload("a.txt", "text/plain", 1, "")
            .await
            .unwrap();
        storage.mark_uploaded(&metadata.file_id);

        service.delete_file(&metadata.file_id).await.unwrap();
        service.delete_file(&metadata.file_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_url_is_pure_delegation() {
        let service = service(Arc::new(MemoryStorage::default()));
        let id = filedepot_core::RandomFileIdGenerator.generate();
        assert_eq!(
            service.file_url(id.as_str()),
            format!("{}/{}", BASE_URL, id)
        );
    }
}
