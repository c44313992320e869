//! Transfer abstraction traits
//!
//! This module defines the error taxonomy and the traits every backend implements.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Boxed cause carried by [`StorageError::OperationFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Storage operation errors
///
/// Every variant is a storage operation error, so matching on `StorageError`
/// as a whole handles all transfer failures. `NotFound` and `InvalidPath` are
/// validation failures and always reach the caller unchanged; anything else is
/// reported as `OperationFailed` with the original cause attached.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Discriminant of [`StorageError`], for callers that branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    OperationFailed,
    NotFound,
    InvalidPath,
}

impl StorageError {
    /// Root-kind failure without an underlying cause.
    pub fn operation(message: impl Into<String>) -> Self {
        StorageError::OperationFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Root-kind failure wrapping the error that caused it.
    pub fn wrap(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        StorageError::OperationFailed {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::OperationFailed { .. } => StorageErrorKind::OperationFailed,
            StorageError::NotFound(_) => StorageErrorKind::NotFound,
            StorageError::InvalidPath(_) => StorageErrorKind::InvalidPath,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == StorageErrorKind::NotFound
    }

    pub fn is_invalid_path(&self) -> bool {
        self.kind() == StorageErrorKind::InvalidPath
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::wrap(format!("IO error: {}", err), err)
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Copies a local file to a backend destination.
///
/// Implementations check, in this order: the local path exists (`NotFound`),
/// the local path is a regular file (`InvalidPath`), the destination has the
/// backend's locator shape (`InvalidPath`). Nothing is transferred before all
/// three checks pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, local_path: &Path, destination: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Copies a backend object to a local path.
///
/// The parent directory of `local_path` is created when missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, source: &str, local_path: &Path) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Produces matched uploader/downloader pairs for one backend.
///
/// Both methods are pure constructors: no I/O and no reachability checks.
/// Each call returns a new instance carrying the factory's resolved configuration.
#[cfg_attr(test, mockall::automock)]
pub trait StorageFactory: Send + Sync {
    fn create_uploader(&self) -> Box<dyn Uploader>;

    fn create_downloader(&self) -> Box<dyn Downloader>;

    fn backend_type(&self) -> StorageBackend;
}
