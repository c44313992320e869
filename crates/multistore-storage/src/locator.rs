//! Remote object locators.
//!
//! Format: `{scheme}://{bucket}/{key}`. The scheme is fixed per backend and
//! both bucket and key must be non-empty.

use std::fmt;

use crate::{StorageError, StorageResult};

/// Parsed `scheme://bucket/key` reference to an object in a remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocator {
    scheme: &'static str,
    bucket: String,
    key: String,
}

impl ObjectLocator {
    /// Parse `locator`, requiring it to use `scheme`.
    ///
    /// Any other shape is rejected with `StorageError::InvalidPath`.
    pub fn parse(locator: &str, scheme: &'static str) -> StorageResult<Self> {
        let invalid = || {
            StorageError::InvalidPath(format!(
                "{} (expected {}://<bucket>/<key>)",
                locator, scheme
            ))
        };

        let rest = locator
            .strip_prefix(scheme)
            .and_then(|rest| rest.strip_prefix("://"))
            .ok_or_else(invalid)?;
        let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
        if bucket.is_empty() || key.is_empty() {
            return Err(invalid());
        }

        Ok(ObjectLocator {
            scheme,
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/{}", self.scheme, self.bucket, self.key)
    }
}
