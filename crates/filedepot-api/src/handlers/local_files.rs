//! Byte-transfer routes for the local backend.
//!
//! A real object store receives the presigned PUT directly; in local mode the
//! service itself plays that role. These routes are mounted only when the
//! local backend is active.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use filedepot_core::AppError;
use filedepot_storage::LocalFileStorage;
use std::sync::Arc;

fn local_backend(state: &AppState) -> Result<&Arc<LocalFileStorage>, HttpAppError> {
    state.local_files.as_ref().ok_or_else(|| {
        HttpAppError::from(AppError::BadRequest(
            "Direct byte routes are only available with the local storage backend".to_string(),
        ))
    })
}

/// Accept the out-of-band PUT a local upload credential points at.
#[tracing::instrument(
    skip(state, body),
    fields(file_id = %file_id, file_name = %file_name, operation = "upload_file_bytes")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path((file_id, file_name)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    if body.is_empty() {
        return Err(HttpAppError::from(AppError::InvalidInput(
            "Upload body is empty".to_string(),
        )));
    }

    let url = local_backend(&state)?
        .write_object(&file_id, &file_name, &body)
        .await?;

    Ok(Json(serde_json::json!({ "url": url })))
}

/// Serve uploaded bytes back. The local backend does not record the content
/// type, so responses are served as a generic byte stream.
#[tracing::instrument(
    skip(state),
    fields(file_id = %file_id, file_name = %file_name, operation = "download_file_bytes")
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path((file_id, file_name)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    let data = local_backend(&state)?
        .read_object(&file_id, &file_name)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(axum::body::Body::from(data))
        .map_err(|e| HttpAppError::from(AppError::Internal(e.to_string())))?;

    Ok(response)
}
