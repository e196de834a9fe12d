pub mod file;
pub mod upload;

pub use file::{FileMetadata, UploadCredential};
pub use upload::{
    ConfirmUploadRequest, ConfirmUploadResponse, DeleteFileResponse, FileInfoResponse,
    RequestUploadRequest, RequestUploadResponse,
};
