//! Transfer service
//!
//! Thin facade over one uploader and one downloader. The service only knows
//! the traits, never a concrete backend.

use crate::{Downloader, StorageBackend, StorageFactory, StorageResult, Uploader};
use std::path::Path;

/// Uploads and downloads through the backend its factory selects.
///
/// The uploader and downloader are created once, in [`TransferService::new`],
/// and kept for the lifetime of the service. To switch backends, build a new
/// service from another factory.
pub struct TransferService {
    uploader: Box<dyn Uploader>,
    downloader: Box<dyn Downloader>,
}

impl TransferService {
    pub fn new<F>(factory: &F) -> Self
    where
        F: StorageFactory + ?Sized,
    {
        let uploader = factory.create_uploader();
        let downloader = factory.create_downloader();

        tracing::debug!(backend = %factory.backend_type(), "Transfer service ready");

        TransferService {
            uploader,
            downloader,
        }
    }

    /// Upload `local_path` to `destination`. Errors are returned unchanged.
    pub async fn upload_file(&self, local_path: &Path, destination: &str) -> StorageResult<()> {
        self.uploader.upload(local_path, destination).await
    }

    /// Download `source` to `local_path`. Errors are returned unchanged.
    pub async fn download_file(&self, source: &str, local_path: &Path) -> StorageResult<()> {
        self.downloader.download(source, local_path).await
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.uploader.backend_type()
    }
}
