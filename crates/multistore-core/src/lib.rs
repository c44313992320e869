//! Multistore Core Library
//!
//! This crate provides the backend identifiers, configuration types and
//! environment resolution shared by the storage backends and the CLI.

pub mod config;
pub mod constants;
pub mod storage_types;

// Re-export commonly used types
pub use config::{
    resolve_setting, EnvSource, GcsConfig, GcsOptions, ProcessEnv, S3Config, S3Options,
};
pub use storage_types::StorageBackend;
