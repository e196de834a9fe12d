//! Shared HTTP client for the Filedepot API.
//!
//! Provides a minimal client with generic GET/POST/DELETE helpers plus the
//! out-of-band transfer: a credential-driven request against the upload URL
//! using whatever method and headers the server handed back.

use anyhow::{Context, Result};
use filedepot_core::models::upload::{
    ConfirmUploadRequest, ConfirmUploadResponse, DeleteFileResponse, FileInfoResponse,
    RequestUploadRequest, RequestUploadResponse,
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// API version prefix (e.g. "/api/v1"). Set FILEDEPOT_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("FILEDEPOT_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// Guess a MIME type from the file extension. Upload requests require a
/// content type; callers can always override the guess.
pub fn guess_content_type(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(|e| e.to_lowercase()) {
        Some(ext) => match ext.as_str() {
            "txt" => "text/plain",
            "html" | "htm" => "text/html",
            "json" => "application/json",
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "mp4" => "video/mp4",
            "mp3" => "audio/mpeg",
            "zip" => "application/zip",
            "csv" => "text/csv",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}

/// HTTP client for the Filedepot API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: FILEDEPOT_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FILEDEPOT_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:8005".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }
        Ok(response)
    }

    /// Phase 1: request an upload credential.
    pub async fn request_upload(
        &self,
        request: &RequestUploadRequest,
    ) -> Result<RequestUploadResponse> {
        let url = self.build_url(&format!("{}/files/uploads", api_prefix()));
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send upload request")?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse upload response as JSON")
    }

    /// Phase 2: transfer the bytes to the credential's upload URL, using the
    /// method and headers the server handed back. A non-2xx response is fatal;
    /// the caller must request a fresh credential.
    pub async fn transfer_bytes(
        &self,
        upload_url: &str,
        method: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> Result<()> {
        let method = reqwest::Method::from_bytes(method.as_bytes())
            .with_context(|| format!("Invalid transfer method: {}", method))?;

        let mut request = self.client.request(method, upload_url).body(body);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .context("Failed to transfer bytes to upload URL")?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// Phase 3: confirm the completed transfer.
    pub async fn confirm_upload(&self, file_id: &str) -> Result<ConfirmUploadResponse> {
        let url = self.build_url(&format!("{}/files/uploads/confirm", api_prefix()));
        let response = self
            .client
            .post(&url)
            .json(&ConfirmUploadRequest {
                file_id: file_id.to_string(),
            })
            .send()
            .await
            .context("Failed to send confirm request")?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse confirm response as JSON")
    }

    /// Fetch file metadata by ID.
    pub async fn get_file_info(&self, file_id: &str) -> Result<FileInfoResponse> {
        let url = self.build_url(&format!("{}/files/{}", api_prefix(), file_id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send info request")?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse info response as JSON")
    }

    /// Delete a file by ID.
    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteFileResponse> {
        let url = self.build_url(&format!("{}/files/{}", api_prefix(), file_id));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to send delete request")?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse delete response as JSON")
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
