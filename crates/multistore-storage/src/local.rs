use crate::traits::{Downloader, StorageError, StorageResult, Uploader};
use crate::validation::{ensure_parent_dir, ensure_source_file};
use crate::StorageBackend;
use async_trait::async_trait;
use std::fs::{FileTimes, Metadata};
use std::io;
use std::path::Path;
use std::time::Instant;
use tokio::fs;

/// Local filesystem uploader: copies a file to another local path.
#[derive(Debug, Clone, Default)]
pub struct DiskUploader;

impl DiskUploader {
    pub fn new() -> Self {
        DiskUploader
    }
}

/// Local filesystem downloader: copies a local file to another local path.
#[derive(Debug, Clone, Default)]
pub struct DiskDownloader;

impl DiskDownloader {
    pub fn new() -> Self {
        DiskDownloader
    }
}

#[async_trait]
impl Uploader for DiskUploader {
    async fn upload(&self, local_path: &Path, destination: &str) -> StorageResult<()> {
        let source_meta = ensure_source_file(local_path).await?;
        let dest_path = Path::new(destination);
        let start = Instant::now();

        let size = copy_file(local_path, dest_path, &source_meta)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    source = %local_path.display(),
                    destination = %destination,
                    "Local storage upload failed"
                );
                StorageError::wrap(format!("Upload failed: {}", e), e)
            })?;

        tracing::info!(
            source = %local_path.display(),
            destination = %destination,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[async_trait]
impl Downloader for DiskDownloader {
    async fn download(&self, source: &str, local_path: &Path) -> StorageResult<()> {
        let source_path = Path::new(source);
        let source_meta = ensure_source_file(source_path).await?;
        let start = Instant::now();

        let size = copy_file(source_path, local_path, &source_meta)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    source = %source,
                    destination = %local_path.display(),
                    "Local storage download failed"
                );
                StorageError::wrap(format!("Download failed: {}", e), e)
            })?;

        tracing::info!(
            source = %source,
            destination = %local_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Copy bytes, permissions and access/modification times from `source` to
/// `destination`, creating missing parent directories and replacing any
/// existing destination file.
///
/// An existing directory as `destination` receives the file under the
/// source's file name.
async fn copy_file(source: &Path, destination: &Path, source_meta: &Metadata) -> io::Result<u64> {
    let target = match fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => match source.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        },
        _ => destination.to_path_buf(),
    };
    let destination = target.as_path();

    if let Ok(dest_meta) = fs::metadata(destination).await {
        if is_same_file(source, source_meta, destination, &dest_meta).await {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} and {} are the same file",
                    source.display(),
                    destination.display()
                ),
            ));
        }
    }

    ensure_parent_dir(destination).await?;

    let mut reader = fs::File::open(source).await?;
    let mut writer = fs::File::create(destination).await?;
    let size = tokio::io::copy(&mut reader, &mut writer).await?;
    writer.sync_all().await?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = source_meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = source_meta.modified() {
        times = times.set_modified(modified);
    }

    // Permissions last, so a read-only source does not block setting the times.
    let writer = writer.into_std().await;
    writer.set_times(times)?;
    writer.set_permissions(source_meta.permissions())?;

    Ok(size)
}

/// Hard links and symlinks count as the same file.
#[cfg(unix)]
async fn is_same_file(_: &Path, source_meta: &Metadata, _: &Path, dest_meta: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;

    source_meta.dev() == dest_meta.dev() && source_meta.ino() == dest_meta.ino()
}

#[cfg(not(unix))]
async fn is_same_file(source: &Path, _: &Metadata, destination: &Path, _: &Metadata) -> bool {
    match (
        fs::canonicalize(source).await,
        fs::canonicalize(destination).await,
    ) {
        (Ok(from), Ok(to)) => from == to,
        _ => false,
    }
}
