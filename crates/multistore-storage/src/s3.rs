use crate::locator::ObjectLocator;
use crate::traits::{Downloader, StorageError, StorageResult, Uploader};
use crate::validation::{ensure_parent_dir, ensure_source_file};
use crate::StorageBackend;
use async_trait::async_trait;
use multistore_core::constants::S3_SCHEME;
use multistore_core::S3Config;
use std::path::Path;

/// S3 uploader
///
/// Placeholder until a real S3 client is integrated: validates inputs in the
/// same order a real upload would, logs, and transfers nothing.
#[derive(Debug, Clone)]
pub struct S3Uploader {
    config: S3Config,
}

impl S3Uploader {
    pub fn new(config: S3Config) -> Self {
        S3Uploader { config }
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }
}

/// S3 downloader
///
/// Placeholder until a real S3 client is integrated: validates the source
/// locator, prepares the destination directory, logs, and transfers nothing.
#[derive(Debug, Clone)]
pub struct S3Downloader {
    config: S3Config,
}

impl S3Downloader {
    pub fn new(config: S3Config) -> Self {
        S3Downloader { config }
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }
}

#[async_trait]
impl Uploader for S3Uploader {
    async fn upload(&self, local_path: &Path, destination: &str) -> StorageResult<()> {
        ensure_source_file(local_path).await?;
        let location = ObjectLocator::parse(destination, S3_SCHEME)?;

        tracing::info!(
            source = %local_path.display(),
            bucket = %location.bucket(),
            key = %location.key(),
            region = %self.config.region,
            "Uploading file to S3"
        );
        tracing::warn!(
            backend = %StorageBackend::S3,
            "S3 uploader is a stub; no data was transferred"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[async_trait]
impl Downloader for S3Downloader {
    async fn download(&self, source: &str, local_path: &Path) -> StorageResult<()> {
        let location = ObjectLocator::parse(source, S3_SCHEME)?;

        ensure_parent_dir(local_path).await.map_err(|e| {
            tracing::error!(
                error = %e,
                source = %source,
                destination = %local_path.display(),
                "S3 download failed"
            );
            StorageError::wrap(format!("Download failed: {}", e), e)
        })?;

        tracing::info!(
            bucket = %location.bucket(),
            key = %location.key(),
            destination = %local_path.display(),
            region = %self.config.region,
            "Downloading file from S3"
        );
        tracing::warn!(
            backend = %StorageBackend::S3,
            "S3 downloader is a stub; no data was transferred"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

// These tests cover validation and directory preparation only; the stub never
// talks to S3.
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn source_file(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("test.txt");
        std::fs::write(&path, "test content").unwrap();
        path
    }

    #[tokio::test]
    async fn test_upload_accepts_s3_destination() {
        let dir = tempdir().unwrap();
        let source = source_file(dir.path());

        S3Uploader::new(S3Config::default())
            .upload(&source, "s3://bucket/test.txt")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_missing_source_wins_over_bad_destination() {
        let dir = tempdir().unwrap();

        let result = S3Uploader::new(S3Config::default())
            .upload(&dir.path().join("missing.txt"), "not-a-locator")
            .await;

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_upload_directory_source_is_invalid_path() {
        let dir = tempdir().unwrap();

        let result = S3Uploader::new(S3Config::default())
            .upload(dir.path(), "s3://bucket/test.txt")
            .await;

        match result {
            Err(StorageError::InvalidPath(message)) => assert!(message.contains("not a file")),
            other => panic!("Expected InvalidPath, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_rejects_non_s3_destination() {
        let dir = tempdir().unwrap();
        let source = source_file(dir.path());
        let uploader = S3Uploader::new(S3Config::default());

        for destination in ["/tmp/dest.txt", "gs://bucket/test.txt", "s3:/bucket/key"] {
            let result = uploader.upload(&source, destination).await;
            assert!(
                matches!(result, Err(StorageError::InvalidPath(_))),
                "{} should be rejected",
                destination
            );
        }
    }

    #[tokio::test]
    async fn test_download_creates_destination_directory() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("downloads").join("test.txt");

        S3Downloader::new(S3Config::default())
            .download("s3://bucket/test.txt", &dest)
            .await
            .unwrap();

        assert!(dest.parent().unwrap().is_dir());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_rejects_non_s3_source() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("downloads").join("test.txt");

        let result = S3Downloader::new(S3Config::default())
            .download("gs://bucket/test.txt", &dest)
            .await;

        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
        assert!(!dest.parent().unwrap().exists());
    }

    #[test]
    fn test_config_is_owned_by_instance() {
        let config = S3Config {
            access_key_id: Some("test_key".to_string()),
            secret_access_key: Some("test_secret".to_string()),
            region: "us-west-2".to_string(),
        };
        let uploader = S3Uploader::new(config.clone());
        let downloader = S3Downloader::new(config.clone());

        assert_eq!(uploader.config(), &config);
        assert_eq!(downloader.config(), &config);
        assert_eq!(Uploader::backend_type(&uploader), StorageBackend::S3);
        assert_eq!(Downloader::backend_type(&downloader), StorageBackend::S3);
    }
}
