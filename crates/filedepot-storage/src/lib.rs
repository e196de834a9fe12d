//! Filedepot Storage Library
//!
//! This crate provides the storage abstraction for the presigned-upload
//! protocol and its local filesystem implementation.
//!
//! # Storage layout
//!
//! Each file ID maps to one subdirectory under the configured root:
//! `{root}/{file_id}/{file_name}`. The directory is created when the upload
//! credential is issued; the object file inside it is written by the
//! out-of-band upload. An upload counts as confirmed only once the directory
//! contains at least one regular file, so a merely-requested upload can never
//! pass confirmation.
//!
//! File IDs are validated against the 32-character lowercase hex shape before
//! they touch the filesystem, which also rules out path traversal.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_local_storage, create_storage, resolve_backend};
pub use filedepot_core::StorageBackend;
pub use local::LocalFileStorage;
pub use traits::{FileStorage, StorageError, StorageResult};
