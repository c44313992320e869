//! Multistore Storage Library
//!
//! This crate provides the transfer abstraction over storage backends: the
//! `Uploader`, `Downloader` and `StorageFactory` traits, one implementation
//! per backend, and the `TransferService` facade.
//!
//! # Locator format
//!
//! - **Local filesystem**: plain paths, absolute or relative.
//! - **S3**: `s3://{bucket}/{key}`
//! - **GCS**: `gs://{bucket}/{key}`
//!
//! The S3 and GCS backends validate their inputs and log, but do not move any
//! data yet. Their validation order and error kinds are the ones a real client
//! will keep.

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod locator;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod service;
pub mod traits;
pub(crate) mod validation;

// Re-export commonly used types
#[cfg(feature = "storage-gcs")]
pub use factory::GcsStorageFactory;
#[cfg(feature = "storage-local")]
pub use factory::LocalDiskStorageFactory;
#[cfg(feature = "storage-s3")]
pub use factory::S3StorageFactory;
pub use factory::{create_factory, StorageSettings};
#[cfg(feature = "storage-gcs")]
pub use gcs::{GcsDownloader, GcsUploader};
#[cfg(feature = "storage-local")]
pub use local::{DiskDownloader, DiskUploader};
pub use locator::ObjectLocator;
pub use multistore_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Downloader, S3Uploader};
pub use service::TransferService;
pub use traits::{
    Downloader, StorageError, StorageErrorKind, StorageFactory, StorageResult, Uploader,
};
