#[cfg(feature = "storage-gcs")]
use crate::gcs::{GcsDownloader, GcsUploader};
#[cfg(feature = "storage-local")]
use crate::local::{DiskDownloader, DiskUploader};
#[cfg(feature = "storage-s3")]
use crate::s3::{S3Downloader, S3Uploader};
use crate::{Downloader, StorageBackend, StorageFactory, StorageResult, Uploader};
#[cfg(not(all(
    feature = "storage-s3",
    feature = "storage-gcs",
    feature = "storage-local"
)))]
use crate::StorageError;
use multistore_core::{EnvSource, GcsOptions, S3Options};
#[cfg(feature = "storage-gcs")]
use multistore_core::GcsConfig;
#[cfg(feature = "storage-s3")]
use multistore_core::S3Config;
use std::sync::Arc;

/// Factory for the local filesystem backend. Takes no configuration.
#[cfg(feature = "storage-local")]
#[derive(Debug, Clone, Default)]
pub struct LocalDiskStorageFactory;

#[cfg(feature = "storage-local")]
impl LocalDiskStorageFactory {
    pub fn new() -> Self {
        LocalDiskStorageFactory
    }

    pub fn uploader(&self) -> DiskUploader {
        DiskUploader::new()
    }

    pub fn downloader(&self) -> DiskDownloader {
        DiskDownloader::new()
    }
}

#[cfg(feature = "storage-local")]
impl StorageFactory for LocalDiskStorageFactory {
    fn create_uploader(&self) -> Box<dyn Uploader> {
        Box::new(self.uploader())
    }

    fn create_downloader(&self) -> Box<dyn Downloader> {
        Box::new(self.downloader())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Factory for the S3 backend.
///
/// Configuration is resolved once, at construction; every uploader and
/// downloader gets its own copy.
#[cfg(feature = "storage-s3")]
#[derive(Debug, Clone)]
pub struct S3StorageFactory {
    config: S3Config,
}

#[cfg(feature = "storage-s3")]
impl S3StorageFactory {
    /// Resolve `options` against the process environment.
    pub fn new(options: S3Options) -> Self {
        Self::from_config(S3Config::from_env(options))
    }

    /// Resolve `options` against the given environment.
    pub fn with_env(options: S3Options, env: &impl EnvSource) -> Self {
        Self::from_config(S3Config::resolve(options, env))
    }

    pub fn from_config(config: S3Config) -> Self {
        S3StorageFactory { config }
    }

    pub fn config(&self) -> &S3Config {
        &self.config
    }

    pub fn uploader(&self) -> S3Uploader {
        S3Uploader::new(self.config.clone())
    }

    pub fn downloader(&self) -> S3Downloader {
        S3Downloader::new(self.config.clone())
    }
}

#[cfg(feature = "storage-s3")]
impl StorageFactory for S3StorageFactory {
    fn create_uploader(&self) -> Box<dyn Uploader> {
        Box::new(self.uploader())
    }

    fn create_downloader(&self) -> Box<dyn Downloader> {
        Box::new(self.downloader())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Factory for the Google Cloud Storage backend.
#[cfg(feature = "storage-gcs")]
#[derive(Debug, Clone)]
pub struct GcsStorageFactory {
    config: GcsConfig,
}

#[cfg(feature = "storage-gcs")]
impl GcsStorageFactory {
    /// Resolve `options` against the process environment.
    pub fn new(options: GcsOptions) -> Self {
        Self::from_config(GcsConfig::from_env(options))
    }

    /// Resolve `options` against the given environment.
    pub fn with_env(options: GcsOptions, env: &impl EnvSource) -> Self {
        Self::from_config(GcsConfig::resolve(options, env))
    }

    pub fn from_config(config: GcsConfig) -> Self {
        GcsStorageFactory { config }
    }

    pub fn config(&self) -> &GcsConfig {
        &self.config
    }

    pub fn uploader(&self) -> GcsUploader {
        GcsUploader::new(self.config.clone())
    }

    pub fn downloader(&self) -> GcsDownloader {
        GcsDownloader::new(self.config.clone())
    }
}

#[cfg(feature = "storage-gcs")]
impl StorageFactory for GcsStorageFactory {
    fn create_uploader(&self) -> Box<dyn Uploader> {
        Box::new(self.uploader())
    }

    fn create_downloader(&self) -> Box<dyn Downloader> {
        Box::new(self.downloader())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}

/// Explicit settings for every backend; only the selected backend's part is used.
#[derive(Clone, Default)]
pub struct StorageSettings {
    pub s3: S3Options,
    pub gcs: GcsOptions,
}

/// Create a storage factory for the given backend
///
/// Omitted settings are resolved against `env`. Fails only when the backend
/// was compiled out.
#[allow(unused_variables)]
pub fn create_factory(
    backend: StorageBackend,
    settings: StorageSettings,
    env: &impl EnvSource,
) -> StorageResult<Arc<dyn StorageFactory>> {
    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => Ok(Arc::new(S3StorageFactory::with_env(settings.s3, env))),

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::operation(
            "S3 storage backend not available (storage-s3 feature not enabled)",
        )),

        #[cfg(feature = "storage-gcs")]
        StorageBackend::Gcs => Ok(Arc::new(GcsStorageFactory::with_env(settings.gcs, env))),

        #[cfg(not(feature = "storage-gcs"))]
        StorageBackend::Gcs => Err(StorageError::operation(
            "GCS storage backend not available (storage-gcs feature not enabled)",
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => Ok(Arc::new(LocalDiskStorageFactory::new())),

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::operation(
            "Local storage backend not available (storage-local feature not enabled)",
        )),
    }
}

#[cfg(all(
    test,
    feature = "storage-s3",
    feature = "storage-gcs",
    feature = "storage-local"
))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn empty_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_s3_factory_with_explicit_credentials() {
        let factory = S3StorageFactory::with_env(
            S3Options {
                access_key_id: Some("test_key".to_string()),
                secret_access_key: Some("test_secret".to_string()),
                region: Some("us-west-2".to_string()),
            },
            &empty_env,
        );

        let uploader = factory.uploader();
        assert_eq!(uploader.config().access_key_id.as_deref(), Some("test_key"));
        assert_eq!(
            uploader.config().secret_access_key.as_deref(),
            Some("test_secret")
        );
        assert_eq!(uploader.config().region, "us-west-2");
    }

    #[test]
    fn test_s3_factory_falls_back_to_environment() {
        let env = |key: &str| match key {
            "AWS_ACCESS_KEY_ID" => Some("env-key".to_string()),
            "AWS_REGION" => Some("eu-central-1".to_string()),
            _ => None,
        };
        let factory = S3StorageFactory::with_env(S3Options::default(), &env);

        assert_eq!(factory.config().access_key_id.as_deref(), Some("env-key"));
        assert!(factory.config().secret_access_key.is_none());
        assert_eq!(factory.config().region, "eu-central-1");
    }

    #[test]
    fn test_s3_factory_default_region() {
        let factory = S3StorageFactory::with_env(S3Options::default(), &empty_env);
        assert_eq!(factory.downloader().config().region, "us-east-1");
    }

    #[test]
    fn test_uploaders_are_independent_with_equal_config() {
        let factory = S3StorageFactory::with_env(
            S3Options {
                access_key_id: Some("key".to_string()),
                ..Default::default()
            },
            &empty_env,
        );

        let first = factory.uploader();
        let second = factory.uploader();

        assert_eq!(first.config(), second.config());
        assert!(!std::ptr::eq(first.config(), second.config()));
        assert_eq!(first.config(), factory.downloader().config());
    }

    #[test]
    fn test_gcs_factory_with_credentials() {
        let factory = GcsStorageFactory::with_env(
            GcsOptions {
                project_id: Some("test-project".to_string()),
                credentials_path: Some("/path/to/credentials.json".to_string()),
            },
            &empty_env,
        );

        let uploader = factory.uploader();
        assert_eq!(uploader.config().project_id.as_deref(), Some("test-project"));
        assert_eq!(
            uploader.config().credentials_path,
            Some(PathBuf::from("/path/to/credentials.json"))
        );
        assert_eq!(factory.downloader().config(), uploader.config());
    }

    #[test]
    fn test_gcs_factory_without_configuration() {
        let factory = GcsStorageFactory::with_env(GcsOptions::default(), &empty_env);
        assert_eq!(factory.config(), &GcsConfig::default());
    }

    #[test]
    fn test_factories_produce_matching_backends() {
        let factories: Vec<Arc<dyn StorageFactory>> = vec![
            Arc::new(LocalDiskStorageFactory::new()),
            Arc::new(S3StorageFactory::with_env(S3Options::default(), &empty_env)),
            Arc::new(GcsStorageFactory::with_env(GcsOptions::default(), &empty_env)),
        ];

        for factory in factories {
            let backend = factory.backend_type();
            assert_eq!(factory.create_uploader().backend_type(), backend);
            assert_eq!(factory.create_downloader().backend_type(), backend);
        }
    }

    #[test]
    fn test_create_factory_selects_backend() {
        for backend in [StorageBackend::S3, StorageBackend::Gcs, StorageBackend::Local] {
            let factory = create_factory(backend, StorageSettings::default(), &empty_env).unwrap();
            assert_eq!(factory.backend_type(), backend);
        }
    }
}
