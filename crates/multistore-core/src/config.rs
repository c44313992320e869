//! Configuration module
//!
//! Backend configuration is resolved once, when a factory is built. Every
//! field follows the same precedence: explicit value, then environment
//! variable, then unset. Empty strings count as unset at both levels.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_AWS_REGION, ENV_AWS_ACCESS_KEY_ID, ENV_AWS_REGION, ENV_AWS_SECRET_ACCESS_KEY,
    ENV_GOOGLE_APPLICATION_CREDENTIALS, ENV_GOOGLE_CLOUD_PROJECT,
};

/// Source of environment variables used as configuration fallback.
///
/// The process environment is the default; tests pass a closure so they never
/// touch real process state.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Resolve a single setting: explicit value > environment variable > unset.
pub fn resolve_setting(explicit: Option<String>, key: &str, env: &impl EnvSource) -> Option<String> {
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| env.var(key).filter(|value| !value.is_empty()))
}

/// Explicit S3 settings supplied by the caller. Omitted fields fall back to the environment.
#[derive(Clone, Default)]
pub struct S3Options {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
}

/// Resolved S3 configuration
#[derive(Clone, PartialEq, Eq)]
pub struct S3Config {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
}

impl S3Config {
    pub fn resolve(options: S3Options, env: &impl EnvSource) -> Self {
        S3Config {
            access_key_id: resolve_setting(options.access_key_id, ENV_AWS_ACCESS_KEY_ID, env),
            secret_access_key: resolve_setting(
                options.secret_access_key,
                ENV_AWS_SECRET_ACCESS_KEY,
                env,
            ),
            region: resolve_setting(options.region, ENV_AWS_REGION, env)
                .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
        }
    }

    pub fn from_env(options: S3Options) -> Self {
        Self::resolve(options, &ProcessEnv)
    }
}

impl Default for S3Config {
    fn default() -> Self {
        S3Config {
            access_key_id: None,
            secret_access_key: None,
            region: DEFAULT_AWS_REGION.to_string(),
        }
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "***"),
            )
            .field("region", &self.region)
            .finish()
    }
}

/// Explicit GCS settings supplied by the caller. Omitted fields fall back to the environment.
#[derive(Debug, Clone, Default)]
pub struct GcsOptions {
    pub project_id: Option<String>,
    pub credentials_path: Option<String>,
}

/// Resolved GCS configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcsConfig {
    pub project_id: Option<String>,
    pub credentials_path: Option<PathBuf>,
}

impl GcsConfig {
    pub fn resolve(options: GcsOptions, env: &impl EnvSource) -> Self {
        GcsConfig {
            project_id: resolve_setting(options.project_id, ENV_GOOGLE_CLOUD_PROJECT, env),
            credentials_path: resolve_setting(
                options.credentials_path,
                ENV_GOOGLE_APPLICATION_CREDENTIALS,
                env,
            )
            .map(PathBuf::from),
        }
    }

    pub fn from_env(options: GcsOptions) -> Self {
        Self::resolve(options, &ProcessEnv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&'static str, &'static str> = vars.iter().copied().collect();
        move |key: &str| vars.get(key).map(|value| value.to_string())
    }

    #[test]
    fn explicit_value_wins_over_environment() {
        let env = fake_env(&[("AWS_REGION", "eu-west-1")]);
        let value = resolve_setting(Some("us-west-2".to_string()), "AWS_REGION", &env);
        assert_eq!(value.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn environment_used_when_explicit_missing() {
        let env = fake_env(&[("AWS_REGION", "eu-west-1")]);
        assert_eq!(
            resolve_setting(None, "AWS_REGION", &env).as_deref(),
            Some("eu-west-1")
        );
    }

    #[test]
    fn empty_values_count_as_unset() {
        let env = fake_env(&[("AWS_REGION", "")]);
        assert_eq!(resolve_setting(Some(String::new()), "AWS_REGION", &env), None);
    }

    #[test]
    fn s3_config_defaults_region_when_nothing_is_set() {
        let config = S3Config::resolve(S3Options::default(), &fake_env(&[]));
        assert_eq!(config, S3Config::default());
        assert_eq!(config.region, "us-east-1");
        assert!(config.access_key_id.is_none());
        assert!(config.secret_access_key.is_none());
    }

    #[test]
    fn s3_config_mixes_explicit_and_environment() {
        let env = fake_env(&[
            ("AWS_ACCESS_KEY_ID", "env-key"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
            ("AWS_REGION", "ap-south-1"),
        ]);
        let options = S3Options {
            access_key_id: Some("test_key".to_string()),
            ..Default::default()
        };

        let config = S3Config::resolve(options, &env);

        assert_eq!(config.access_key_id.as_deref(), Some("test_key"));
        assert_eq!(config.secret_access_key.as_deref(), Some("env-secret"));
        assert_eq!(config.region, "ap-south-1");
    }

    #[test]
    fn s3_config_debug_masks_secret() {
        let config = S3Config {
            access_key_id: Some("key".to_string()),
            secret_access_key: Some("super-secret".to_string()),
            region: "us-east-1".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn gcs_config_resolves_from_environment() {
        let env = fake_env(&[
            ("GOOGLE_CLOUD_PROJECT", "env-project"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/etc/gcs.json"),
        ]);
        let config = GcsConfig::resolve(GcsOptions::default(), &env);
        assert_eq!(config.project_id.as_deref(), Some("env-project"));
        assert_eq!(config.credentials_path, Some(PathBuf::from("/etc/gcs.json")));
    }

    #[test]
    fn gcs_config_leaves_missing_fields_unset() {
        let options = GcsOptions {
            project_id: Some("test-project".to_string()),
            credentials_path: None,
        };
        let config = GcsConfig::resolve(options, &fake_env(&[]));
        assert_eq!(config.project_id.as_deref(), Some("test-project"));
        assert!(config.credentials_path.is_none());
    }
}
