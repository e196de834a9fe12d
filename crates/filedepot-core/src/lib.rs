//! Filedepot Core Library
//!
//! Shared foundation for the filedepot services: configuration, the unified
//! error type, domain models for the presigned-upload protocol, and file ID
//! generation.
//!
//! # File IDs
//!
//! A file ID is 128 bits of CSPRNG output rendered as a 32-character lowercase
//! hexadecimal string. It is the primary key for every operation on a logical
//! file and is never reused. Generation goes through the [`FileIdGenerator`]
//! trait so tests can substitute a deterministic source.

pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, FileServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use id::{FileId, FileIdGenerator, RandomFileIdGenerator};
pub use storage_types::StorageBackend;
