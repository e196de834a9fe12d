use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use filedepot_core::models::upload::{
    ConfirmUploadRequest, ConfirmUploadResponse, RequestUploadRequest, RequestUploadResponse,
};
use filedepot_core::AppError;
use std::sync::Arc;
use validator::Validate;

/// Request an upload: returns a fresh file ID and a presigned credential for
/// the out-of-band transfer.
#[utoipa::path(
    post,
    path = "/api/v0/files/uploads",
    tag = "uploads",
    request_body = RequestUploadRequest,
    responses(
        (status = 200, description = "Upload credential issued", body = RequestUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "Declared size exceeds limit", body = ErrorResponse),
        (status = 502, description = "Credential issuance failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(file_name = %request.file_name, operation = "request_upload")
)]
pub async fn request_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RequestUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    // The declared size is not verified against the eventual upload, but a
    // declaration over the limit is rejected up front.
    let max_bytes = state.config.max_file_size_bytes();
    if request.file_size as u64 > max_bytes as u64 {
        return Err(HttpAppError::from(AppError::PayloadTooLarge(format!(
            "Declared size {} bytes exceeds max {} bytes",
            request.file_size, max_bytes
        ))));
    }

    let (metadata, credential) = state
        .uploads
        .request_upload(
            &request.file_name,
            &request.content_type,
            request.file_size,
            &request.description,
        )
        .await?;

    Ok(Json(RequestUploadResponse {
        file_id: metadata.file_id,
        upload_url: credential.upload_url,
        download_url: credential.download_url,
        method: credential.method,
        headers: credential.headers,
        expires_in: credential.expires_in,
    }))
}

/// Confirm that the out-of-band transfer completed.
///
/// Failures are downgraded: an unconfirmed or unknown upload comes back as
/// `success=false` with a message and HTTP 200, so clients can distinguish
/// "your transfer never landed" from transport-level errors.
#[utoipa::path(
    post,
    path = "/api/v0/files/uploads/confirm",
    tag = "uploads",
    request_body = ConfirmUploadRequest,
    responses(
        (status = 200, description = "Confirm result (success may be false)", body = ConfirmUploadResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(file_id = %request.file_id, operation = "confirm_upload")
)]
pub async fn confirm_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ConfirmUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = match state.uploads.confirm_upload(&request.file_id).await {
        Ok(file_url) => ConfirmUploadResponse {
            success: true,
            file_url: Some(file_url),
            message: "upload confirmed".to_string(),
        },
        Err(e) => {
            tracing::warn!(file_id = %request.file_id, error = %e, "Upload confirmation failed");
            ConfirmUploadResponse {
                success: false,
                file_url: None,
                message: e.to_string(),
            }
        }
    };

    Ok(Json(response))
}
