//! Shared pieces of the `multistore` binary: tracing setup, JSON reports and
//! the demo walkthrough.

use anyhow::Context;
use multistore_core::{EnvSource, StorageBackend};
use multistore_storage::{create_factory, StorageSettings, TransferService};
use serde::Serialize;
use std::path::Path;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Printed after a successful upload or download.
#[derive(Debug, Serialize)]
pub struct TransferReport {
    pub success: bool,
    pub operation: &'static str,
    pub backend: StorageBackend,
    pub source: String,
    pub destination: String,
}

/// Outcome of one demo step.
#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub name: &'static str,
    pub backend: StorageBackend,
    pub error: Option<String>,
}

impl DemoStep {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize report")?;
    println!("{}", out);
    Ok(())
}

/// Walk every backend once: upload a scratch file and download it again.
///
/// Files are written under `work_dir`. A failing step is recorded and the
/// remaining steps still run.
pub async fn run_demo(work_dir: &Path, env: &impl EnvSource) -> anyhow::Result<Vec<DemoStep>> {
    let mut steps = Vec::new();

    let s3_source = work_dir.join("s3-source.txt");
    tokio::fs::write(&s3_source, "Test content for S3")
        .await
        .context("Write S3 demo file")?;
    let result = stub_round_trip(
        StorageBackend::S3,
        &s3_source,
        "s3://bucket/test.txt",
        &work_dir.join("local_test.txt"),
        env,
    )
    .await;
    steps.push(step("Amazon S3 (stub)", StorageBackend::S3, result));

    let local_source = work_dir.join("test.txt");
    tokio::fs::write(&local_source, "Test content for local storage")
        .await
        .context("Write local demo file")?;
    let result = local_round_trip(work_dir, &local_source, env).await;
    steps.push(step("Local disk", StorageBackend::Local, result));

    let gcs_source = work_dir.join("gcs-source.txt");
    tokio::fs::write(&gcs_source, "Test content for GCS")
        .await
        .context("Write GCS demo file")?;
    let result = stub_round_trip(
        StorageBackend::Gcs,
        &gcs_source,
        "gs://bucket/test.txt",
        &work_dir.join("local_gcs_test.txt"),
        env,
    )
    .await;
    steps.push(step("Google Cloud Storage (stub)", StorageBackend::Gcs, result));

    Ok(steps)
}

fn step(name: &'static str, backend: StorageBackend, result: anyhow::Result<()>) -> DemoStep {
    DemoStep {
        name,
        backend,
        error: result.err().map(|e| format!("{:#}", e)),
    }
}

async fn stub_round_trip(
    backend: StorageBackend,
    source: &Path,
    remote: &str,
    local_copy: &Path,
    env: &impl EnvSource,
) -> anyhow::Result<()> {
    let factory = create_factory(backend, StorageSettings::default(), env)?;
    let service = TransferService::new(factory.as_ref());
    service.upload_file(source, remote).await?;
    service.download_file(remote, local_copy).await?;
    Ok(())
}

async fn local_round_trip(
    work_dir: &Path,
    source: &Path,
    env: &impl EnvSource,
) -> anyhow::Result<()> {
    let uploaded = work_dir.join("uploaded").join("test.txt");
    let downloaded = work_dir.join("downloaded").join("test.txt");

    let factory = create_factory(StorageBackend::Local, StorageSettings::default(), env)?;
    let service = TransferService::new(factory.as_ref());
    service
        .upload_file(source, &uploaded.to_string_lossy())
        .await?;
    service
        .download_file(&uploaded.to_string_lossy(), &downloaded)
        .await?;

    anyhow::ensure!(
        tokio::fs::try_exists(&downloaded).await?,
        "{} missing after download",
        downloaded.display()
    );
    Ok(())
}
