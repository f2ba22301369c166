//! File access abstraction trait
//!
//! This module defines the FileAccess trait that both access providers implement.

use crate::paths;
use crate::AccessBackend;
use async_trait::async_trait;
use bytes::Bytes;
use filefacts_core::models::{FileStat, ParsedName};
use thiserror::Error;

/// File access errors. Every variant names the locator that was attempted.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Remote file store returned HTTP {status} for {path}")]
    Http { path: String, status: u16 },

    #[error("Request to remote file store failed for {path}: {message}")]
    Request { path: String, message: String },

    #[error("Invalid response for {path}: {message}")]
    InvalidResponse { path: String, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccessError {
    /// Map an IO error for `path` onto the closest variant.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AccessError::NotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => AccessError::PermissionDenied {
                path: path.to_string(),
            },
            _ => AccessError::Io {
                path: path.to_string(),
                source: err,
            },
        }
    }
}

/// Result type for file access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// File access trait
///
/// Both the local and the remote provider implement this trait so the task processor
/// can stat and sniff files without knowing where they live. One provider is chosen
/// at startup (see [`crate::create_file_access`]) and shared across all tasks.
#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Size and modification time of the file at `path`.
    async fn stat(&self, path: &str) -> AccessResult<FileStat>;

    /// Read at most `len` bytes starting at byte offset `start`.
    ///
    /// Returns fewer bytes when the file ends first; an empty buffer when `start` is
    /// past the end or `len` is 0.
    async fn read_range(&self, path: &str, start: u64, len: usize) -> AccessResult<Bytes>;

    /// Read the first `max_bytes` bytes, for content sniffing.
    async fn read_prefix(&self, path: &str, max_bytes: usize) -> AccessResult<Bytes> {
        self.read_range(path, 0, max_bytes).await
    }

    /// Basename and lowercase extension of `path`. Pure string parsing, never fails.
    fn parse_name(&self, path: &str) -> ParsedName {
        paths::parse_name(path)
    }

    /// Get the access backend type
    fn backend_type(&self) -> AccessBackend;
}
