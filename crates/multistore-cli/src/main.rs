//! Multistore CLI — upload and download files through any storage backend.
//!
//! Credentials not given as flags are read from the environment (a `.env`
//! file is loaded first): AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY,
//! AWS_REGION, GOOGLE_CLOUD_PROJECT, GOOGLE_APPLICATION_CREDENTIALS.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use multistore_cli::{init_tracing, print_json, run_demo, TransferReport};
use multistore_core::{GcsOptions, ProcessEnv, S3Options, StorageBackend};
use multistore_storage::{create_factory, StorageSettings, TransferService};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multistore", about = "Multi-backend file transfer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a local file to a backend destination
    Upload {
        #[command(flatten)]
        backend: BackendArgs,
        /// Path to the file to upload
        path: PathBuf,
        /// Destination: a local path, s3://bucket/key or gs://bucket/key
        destination: String,
    },
    /// Download a backend object to a local path
    Download {
        #[command(flatten)]
        backend: BackendArgs,
        /// Source: a local path, s3://bucket/key or gs://bucket/key
        source: String,
        /// Local destination path; parent directories are created
        path: PathBuf,
    },
    /// Run an upload/download walkthrough against every backend
    Demo,
}

#[derive(Args)]
struct BackendArgs {
    /// Storage backend: local, s3, gcs
    #[arg(long, default_value = "local")]
    backend: StorageBackend,
    /// S3 access key id
    #[arg(long)]
    access_key_id: Option<String>,
    /// S3 secret access key
    #[arg(long)]
    secret_access_key: Option<String>,
    /// S3 region
    #[arg(long)]
    region: Option<String>,
    /// GCS project id
    #[arg(long)]
    project_id: Option<String>,
    /// GCS service account credentials file
    #[arg(long)]
    credentials_path: Option<String>,
}

impl BackendArgs {
    fn service(self) -> anyhow::Result<(StorageBackend, TransferService)> {
        let settings = StorageSettings {
            s3: S3Options {
                access_key_id: self.access_key_id,
                secret_access_key: self.secret_access_key,
                region: self.region,
            },
            gcs: GcsOptions {
                project_id: self.project_id,
                credentials_path: self.credentials_path,
            },
        };
        let factory = create_factory(self.backend, settings, &ProcessEnv)
            .with_context(|| format!("Failed to set up {} backend", self.backend))?;
        Ok((self.backend, TransferService::new(factory.as_ref())))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            backend,
            path,
            destination,
        } => {
            let (backend, service) = backend.service()?;
            service
                .upload_file(&path, &destination)
                .await
                .with_context(|| format!("Upload of {} failed", path.display()))?;
            print_json(&TransferReport {
                success: true,
                operation: "upload",
                backend,
                source: path.display().to_string(),
                destination,
            })?;
        }
        Commands::Download {
            backend,
            source,
            path,
        } => {
            let (backend, service) = backend.service()?;
            service
                .download_file(&source, &path)
                .await
                .with_context(|| format!("Download of {} failed", source))?;
            print_json(&TransferReport {
                success: true,
                operation: "download",
                backend,
                source,
                destination: path.display().to_string(),
            })?;
        }
        Commands::Demo => {
            let work_dir = tempfile::tempdir().context("Create demo directory")?;
            println!("=== Multi-Cloud Storage Provider Demo ===");
            let steps = run_demo(work_dir.path(), &ProcessEnv).await?;
            for (index, step) in steps.iter().enumerate() {
                match &step.error {
                    None => println!("{}. {}: ok", index + 1, step.name),
                    Some(error) => println!("{}. {}: error: {}", index + 1, step.name, error),
                }
            }
            if steps.iter().any(|step| !step.succeeded()) {
                anyhow::bail!("demo finished with failures");
            }
        }
    }

    Ok(())
}
