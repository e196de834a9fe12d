use crate::traits::{FileStorage, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filedepot_core::models::{FileMetadata, UploadCredential};
use filedepot_core::{FileId, StorageBackend};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Maps each file ID to a subdirectory under `base_path` and derives public
/// URLs from `base_url`. The presigned URLs it issues point at the service's
/// own upload/download routes; there is no real signature, so the TTL is
/// advisory for this backend.
#[derive(Clone)]
pub struct LocalFileStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    /// Create a new LocalFileStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/filedepot/uploads")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8005/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalFileStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a file ID to its directory path.
    ///
    /// The ID must match the generated shape (32 lowercase hex characters),
    /// which rules out path traversal before the filesystem is touched.
    fn id_to_path(&self, file_id: &str) -> StorageResult<PathBuf> {
        let id = FileId::parse(file_id)
            .map_err(|_| StorageError::InvalidKey(file_id.to_string()))?;
        Ok(self.base_path.join(id.as_str()))
    }

    /// Generate the public URL for a file
    fn generate_url(&self, file_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_id)
    }

    /// Find the uploaded object inside a file directory, if any.
    ///
    /// Returns the object's file name and metadata. The directory existing
    /// with no object inside means the upload was requested but the transfer
    /// never completed.
    async fn find_object(&self, dir: &Path) -> StorageResult<Option<(String, std::fs::Metadata)>> {
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_file() {
                return Ok(Some((entry.file_name().to_string_lossy().into_owned(), meta)));
            }
        }
        Ok(None)
    }

    /// Write uploaded bytes for a file ID. Backs the service's own upload
    /// route, which stands in for the external storage medium in local mode.
    /// Returns the download URL.
    pub async fn write_object(
        &self,
        file_id: &str,
        file_name: &str,
        data: &[u8],
    ) -> StorageResult<String> {
        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            return Err(StorageError::InvalidKey(format!(
                "invalid file name: {}",
                file_name
            )));
        }

        let dir = self.id_to_path(file_id)?;
        fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        tracing::info!(
            path = %path.display(),
            file_id = %file_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage object written"
        );

        Ok(format!("{}/{}", self.generate_url(file_id), file_name))
    }

    /// Read uploaded bytes back. Backs the service's download route in local
    /// mode.
    pub async fn read_object(&self, file_id: &str, file_name: &str) -> StorageResult<Vec<u8>> {
        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            return Err(StorageError::InvalidKey(format!(
                "invalid file name: {}",
                file_name
            )));
        }

        let path = self.id_to_path(file_id)?.join(file_name);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(file_id.to_string()));
        }

        Ok(fs::read(&path).await?)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn generate_presigned_url(
        &self,
        file_id: &str,
        file_name: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<UploadCredential> {
        let dir = self.id_to_path(file_id)?;

        // Create the target directory now so the out-of-band PUT has a
        // destination. This is the only failure mode for the local backend.
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::CredentialIssuance(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        // The file name rides in the upload URL so the receiving route knows
        // what to call the object it writes.
        let base = self.base_url.trim_end_matches('/');
        let upload_url = format!("{}/upload/{}/{}", base, file_id, file_name);
        let download_url = format!("{}/{}/{}", base, file_id, file_name);

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());

        tracing::debug!(
            file_id = %file_id,
            upload_url = %upload_url,
            expires_in_secs = expires_in.as_secs(),
            "Issued local upload credential"
        );

        Ok(UploadCredential {
            upload_url,
            download_url,
            method: "PUT".to_string(),
            headers,
            expires_in: expires_in.as_secs(),
        })
    }

    fn file_url(&self, file_id: &str) -> String {
        self.generate_url(file_id)
    }

    async fn confirm_upload(&self, file_id: &str) -> StorageResult<()> {
        let dir = self.id_to_path(file_id)?;

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Err(StorageError::NotFound(file_id.to_string()));
        }

        // The directory alone only proves the credential was issued. The
        // transfer is confirmed by the object file the upload wrote into it.
        match self.find_object(&dir).await? {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(format!(
                "{} (upload not completed)",
                file_id
            ))),
        }
    }

    async fn get_file_info(&self, file_id: &str) -> StorageResult<FileMetadata> {
        let dir = self.id_to_path(file_id)?;

        let dir_meta = match fs::metadata(&dir).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(file_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // Name and size are recoverable once the object file exists; content
        // type and description are not stored by this backend.
        let (file_name, file_size, modified) = match self.find_object(&dir).await? {
            Some((name, meta)) => {
                let modified = meta.modified()?;
                (name, meta.len() as i64, modified)
            }
            None => (String::new(), 0, dir_meta.modified()?),
        };

        Ok(FileMetadata {
            file_id: file_id.to_string(),
            file_name,
            content_type: String::new(),
            file_size,
            description: String::new(),
            uploaded_at: DateTime::<Utc>::from(modified),
            file_url: self.generate_url(file_id),
        })
    }

    async fn delete_file(&self, file_id: &str) -> StorageResult<()> {
        let dir = self.id_to_path(file_id)?;

        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_dir_all(&dir).await?;

        tracing::info!(file_id = %file_id, "Local storage delete successful");

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
