use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Metadata record associated with a file ID.
///
/// Created provisionally when an upload is requested; the declared name, type,
/// size, and description are caller-supplied and not verified against the
/// actual bytes. The local backend can only recover `file_id`, `file_url`, and
/// the upload timestamp from storage afterwards, so the other fields come back
/// empty from [`get_file_info`](../../filedepot_storage/traits/trait.FileStorage.html).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileMetadata {
    pub file_id: String,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_url: String,
}

/// Short-lived authorization bundle for one direct upload.
///
/// Generated on demand and never persisted server-side. Valid until
/// `issued_at + expires_in` as enforced by the storage medium; the local
/// backend treats the TTL as advisory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadCredential {
    /// Target address for the out-of-band upload
    pub upload_url: String,
    /// Address the object will be readable from after upload
    pub download_url: String,
    /// Required transfer method (e.g. "PUT")
    pub method: String,
    /// Headers the client must set on the upload request
    pub headers: HashMap<String, String>,
    /// Time-to-live in seconds
    pub expires_in: u64,
}
