use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

/// Request for a presigned upload URL
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct RequestUploadRequest {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// Content type (MIME type)
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// Declared file size in bytes (not verified against the actual upload)
    #[validate(range(min = 1, message = "File size must be at least 1 byte"))]
    pub file_size: i64,
    /// Optional description
    #[serde(default)]
    #[validate(length(max = 1024, message = "Description must be at most 1024 characters"))]
    pub description: String,
}

/// Response containing the upload credential
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestUploadResponse {
    /// File ID (used for confirm/info/delete)
    pub file_id: String,
    /// Presigned URL for the direct upload
    pub upload_url: String,
    /// URL the file will be readable from after upload
    pub download_url: String,
    /// Transfer method to use against `upload_url`
    pub method: String,
    /// Headers the client must set on the upload request
    pub headers: HashMap<String, String>,
    /// Credential time-to-live in seconds
    pub expires_in: u64,
}

/// Request to confirm a completed direct upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmUploadRequest {
    pub file_id: String,
}

/// Result of a confirm attempt. A missing upload is reported as
/// `success=false` with a message, not as a hard failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmUploadResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub message: String,
}

/// File metadata as returned by the info endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileInfoResponse {
    pub file_id: String,
    pub file_name: String,
    pub file_url: String,
    pub content_type: String,
    pub file_size: i64,
    pub description: String,
    /// Upload timestamp, epoch seconds
    pub created_at: i64,
}

/// Result of a delete attempt. Failures are reported as `success=false`
/// with a message, never as a hard failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
}
