//! Filedepot Services Library
//!
//! Business services for the file service. Currently this is the upload
//! coordinator, which drives the three-phase presigned-upload protocol
//! against a storage backend.

pub mod upload;

pub use upload::{FileUploadService, UploadError};
