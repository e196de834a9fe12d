use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use filedepot_core::models::upload::{DeleteFileResponse, FileInfoResponse};
use std::sync::Arc;

/// Fetch the metadata the storage backend can recover for a file ID.
///
/// Fields the backend cannot recover (content type and description for the
/// local backend) come back empty rather than failing the request.
#[utoipa::path(
    get,
    path = "/api/v0/files/{file_id}",
    tag = "files",
    params(("file_id" = String, Path, description = "File ID")),
    responses(
        (status = 200, description = "File metadata", body = FileInfoResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %file_id, operation = "get_file_info"))]
pub async fn get_file_info(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let info = state.uploads.get_file_info(&file_id).await?;

    Ok(Json(FileInfoResponse {
        file_id: info.file_id,
        file_name: info.file_name,
        file_url: info.file_url,
        content_type: info.content_type,
        file_size: info.file_size,
        description: info.description,
        created_at: info.uploaded_at.timestamp(),
    }))
}

/// Delete a file.
///
/// Idempotent, and failures are downgraded to `success=false` with a message.
/// Deleting an unknown or malformed file ID reports success.
#[utoipa::path(
    delete,
    path = "/api/v0/files/{file_id}",
    tag = "files",
    params(("file_id" = String, Path, description = "File ID")),
    responses(
        (status = 200, description = "Delete result (success may be false)", body = DeleteFileResponse)
    )
)]
#[tracing::instrument(skip(state), fields(file_id = %file_id, operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = match state.uploads.delete_file(&file_id).await {
        Ok(()) => DeleteFileResponse {
            success: true,
            message: "file deleted".to_string(),
        },
        Err(e) => {
            tracing::warn!(file_id = %file_id, error = %e, "File deletion failed");
            DeleteFileResponse {
                success: false,
                message: e.to_string(),
            }
        }
    };

    Ok(Json(response))
}
