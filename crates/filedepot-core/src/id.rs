//! File ID generation.
//!
//! IDs are 16 random bytes hex-encoded (32 lowercase hex characters). The
//! generator is a trait so the random source can be replaced in tests.

use rand::RngCore;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Length of a rendered file ID in characters.
pub const FILE_ID_LEN: usize = 32;

/// Opaque unique handle for a logical file.
///
/// Immutable once issued; correlates the upload credential, the metadata
/// record, and the storage location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Parse a file ID from its string form.
    ///
    /// Accepts exactly 32 lowercase hexadecimal characters; anything else is
    /// rejected so IDs can be safely embedded in storage paths and URLs.
    pub fn parse(s: &str) -> Result<Self, InvalidFileId> {
        if s.len() == FILE_ID_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            Ok(FileId(s.to_string()))
        } else {
            Err(InvalidFileId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid file id: {0}")]
pub struct InvalidFileId(pub String);

/// Source of fresh file IDs.
///
/// Injected into the upload coordinator instead of calling a free function so
/// tests can pin the generated IDs.
pub trait FileIdGenerator: Send + Sync {
    fn generate(&self) -> FileId;
}

/// Production generator backed by the thread-local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFileIdGenerator;

impl FileIdGenerator for RandomFileIdGenerator {
    fn generate(&self) -> FileId {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        FileId(hex::encode(bytes))
    }
}
