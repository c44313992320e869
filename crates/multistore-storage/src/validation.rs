//! Checks shared by every backend.

use std::fs::Metadata;
use std::io;
use std::path::Path;
use tokio::fs;

use crate::{StorageError, StorageResult};

/// Ensure a local source path exists and is a regular file.
///
/// Returns the source metadata so callers can carry it over to the destination.
pub(crate) async fn ensure_source_file(path: &Path) -> StorageResult<Metadata> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(meta),
        Ok(_) => Err(StorageError::InvalidPath(format!(
            "Source path is not a file: {}",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(StorageError::NotFound(path.display().to_string()))
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "Failed to inspect source file"
            );
            Err(StorageError::wrap(
                format!("Failed to inspect source {}: {}", path.display(), e),
                e,
            ))
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub(crate) async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let dir = tempdir().unwrap();
        let result = ensure_source_file(&dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_directory_source_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = ensure_source_file(dir.path()).await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_regular_file_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, b"test content").unwrap();

        let meta = ensure_source_file(&path).await.unwrap();
        assert_eq!(meta.len(), 12);
    }

    #[tokio::test]
    async fn test_parent_dir_created_recursively() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("file.txt");

        ensure_parent_dir(&path).await.unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_bare_file_name_needs_no_parent() {
        ensure_parent_dir(Path::new("file.txt")).await.unwrap();
    }
}
