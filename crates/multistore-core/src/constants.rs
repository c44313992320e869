//! Environment variable names and defaults used during configuration resolution.

/// Access key for the S3 backend.
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret key for the S3 backend.
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Region for the S3 backend.
pub const ENV_AWS_REGION: &str = "AWS_REGION";
/// Region used when neither an explicit value nor `AWS_REGION` is set.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Project id for the GCS backend.
pub const ENV_GOOGLE_CLOUD_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";
/// Service account credentials file for the GCS backend.
pub const ENV_GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

pub const S3_SCHEME: &str = "s3";
pub const GCS_SCHEME: &str = "gs";
