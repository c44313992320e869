use crate::locator::ObjectLocator;
use crate::traits::{Downloader, StorageError, StorageResult, Uploader};
use crate::validation::{ensure_parent_dir, ensure_source_file};
use crate::StorageBackend;
use async_trait::async_trait;
use multistore_core::constants::GCS_SCHEME;
use multistore_core::GcsConfig;
use std::path::Path;

/// Google Cloud Storage uploader (stub, no network I/O)
#[derive(Debug, Clone)]
pub struct GcsUploader {
    config: GcsConfig,
}

impl GcsUploader {
    pub fn new(config: GcsConfig) -> Self {
        GcsUploader { config }
    }

    pub fn config(&self) -> &GcsConfig {
        &self.config
    }
}

/// Google Cloud Storage downloader (stub, no network I/O)
#[derive(Debug, Clone)]
pub struct GcsDownloader {
    config: GcsConfig,
}

impl GcsDownloader {
    pub fn new(config: GcsConfig) -> Self {
        GcsDownloader { config }
    }

    pub fn config(&self) -> &GcsConfig {
        &self.config
    }
}

#[async_trait]
impl Uploader for GcsUploader {
    async fn upload(&self, local_path: &Path, destination: &str) -> StorageResult<()> {
        ensure_source_file(local_path).await?;
        let location = ObjectLocator::parse(destination, GCS_SCHEME)?;

        tracing::info!(
            source = %local_path.display(),
            bucket = %location.bucket(),
            key = %location.key(),
            project_id = ?self.config.project_id,
            "Uploading file to GCS"
        );
        tracing::warn!(
            backend = %StorageBackend::Gcs,
            "GCS uploader is a stub; no data was transferred"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}

#[async_trait]
impl Downloader for GcsDownloader {
    async fn download(&self, source: &str, local_path: &Path) -> StorageResult<()> {
        let location = ObjectLocator::parse(source, GCS_SCHEME)?;

        ensure_parent_dir(local_path).await.map_err(|e| {
            tracing::error!(
                error = %e,
                source = %source,
                destination = %local_path.display(),
                "GCS download failed"
            );
            StorageError::wrap(format!("Download failed: {}", e), e)
        })?;

        tracing::info!(
            bucket = %location.bucket(),
            key = %location.key(),
            destination = %local_path.display(),
            project_id = ?self.config.project_id,
            "Downloading file from GCS"
        );
        tracing::warn!(
            backend = %StorageBackend::Gcs,
            "GCS downloader is a stub; no data was transferred"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_upload_accepts_gs_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("test.txt");
        std::fs::write(&source, "test content").unwrap();

        GcsUploader::new(GcsConfig::default())
            .upload(&source, "gs://bucket/test.txt")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_rejects_s3_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("test.txt");
        std::fs::write(&source, "test content").unwrap();

        let result = GcsUploader::new(GcsConfig::default())
            .upload(&source, "s3://bucket/test.txt")
            .await;

        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_upload_file_not_found() {
        let dir = tempdir().unwrap();

        let result = GcsUploader::new(GcsConfig::default())
            .upload(&dir.path().join("missing.txt"), "gs://bucket/test.txt")
            .await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_download_creates_destination_directory() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("gcs").join("nested").join("test.txt");

        GcsDownloader::new(GcsConfig::default())
            .download("gs://bucket/test.txt", &dest)
            .await
            .unwrap();

        assert!(dest.parent().unwrap().is_dir());
    }

    #[tokio::test]
    async fn test_download_rejects_plain_path() {
        let dir = tempdir().unwrap();

        let result = GcsDownloader::new(GcsConfig::default())
            .download("bucket/test.txt", &dir.path().join("test.txt"))
            .await;

        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_download_directory_creation_failure_is_operation_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file where a directory should be").unwrap();

        let result = GcsDownloader::new(GcsConfig::default())
            .download("gs://bucket/test.txt", &blocker.join("test.txt"))
            .await;

        match result {
            Err(StorageError::OperationFailed { message, source }) => {
                assert!(message.starts_with("Download failed"));
                assert!(source.is_some());
            }
            other => panic!("Expected OperationFailed, got {:?}", other),
        }
    }
}
