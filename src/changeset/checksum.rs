use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ChangeSet;
use crate::core::{HistoryError, Result};

/// A content checksum over a changeset definition.
///
/// Canonical form is `version:digest`, e.g. `1:9a0364b9e99bb480`. The digest
/// is opaque to this crate; comparison is exact value equality, the version
/// prefix exists so a hash-algorithm change invalidates nothing silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckSum {
    version: u32,
    digest: String,
}

impl CheckSum {
    pub fn new(version: u32, digest: impl Into<String>) -> Self {
        Self {
            version,
            digest: digest.into(),
        }
    }

    /// Parses the canonical `version:digest` form.
    pub fn parse(text: &str) -> Result<Self> {
        let (version, digest) = text
            .split_once(':')
            .ok_or_else(|| HistoryError::ChecksumFormat(text.to_string()))?;

        let version = version
            .parse::<u32>()
            .map_err(|_| HistoryError::ChecksumFormat(text.to_string()))?;

        if digest.is_empty() {
            return Err(HistoryError::ChecksumFormat(text.to_string()));
        }

        Ok(Self {
            version,
            digest: digest.to_string(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for CheckSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.version, self.digest)
    }
}

impl FromStr for CheckSum {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Checksum computation strategy, injected into the reconciler.
///
/// A pure function from changeset definition to checksum value; the
/// reconciler only ever compares and stores the result.
pub type ChecksumFn = Arc<dyn Fn(&ChangeSet) -> CheckSum + Send + Sync>;
