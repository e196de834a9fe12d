//! OpenAPI documentation.
//! API version is in `crate::constants::API_VERSION`.
//! Paths in handler annotations use placeholder /api/v0; they are transformed at runtime to the actual version.

use utoipa::OpenApi;

use crate::constants::API_VERSION;
use crate::error;
use crate::handlers;
use filedepot_core::models;

/// Placeholder version used in handler path annotations (utoipa requires compile-time literals).
/// Replaced at runtime in the served OpenAPI spec with API_VERSION.
const OPENAPI_PATH_PLACEHOLDER: &str = "/api/v0";

/// Transforms path keys in the OpenAPI spec from placeholder to actual API version.
fn transform_openapi_paths(spec: &mut utoipa::openapi::OpenApi, version: &str) {
    let replacement = format!("/api/{}", version);
    if OPENAPI_PATH_PLACEHOLDER == replacement {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        let new_key = key.replacen(OPENAPI_PATH_PLACEHOLDER, &replacement, 1);
        spec.paths.paths.insert(new_key, item);
    }
}

/// Returns the OpenAPI spec with path placeholders replaced by the current API version.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    transform_openapi_paths(&mut spec, API_VERSION);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filedepot API",
        version = "0.1.0",
        description = "File upload coordination API built around presigned URLs: request a credential, transfer bytes directly to storage, then confirm. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::uploads::request_upload,
        handlers::uploads::confirm_upload,
        handlers::files::get_file_info,
        handlers::files::delete_file,
    ),
    components(
        schemas(
            models::upload::RequestUploadRequest,
            models::upload::RequestUploadResponse,
            models::upload::ConfirmUploadRequest,
            models::upload::ConfirmUploadResponse,
            models::upload::FileInfoResponse,
            models::upload::DeleteFileResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Presigned upload coordination"),
        (name = "files", description = "File metadata and lifecycle")
    )
)]
pub struct ApiDoc;
