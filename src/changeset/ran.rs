use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChangeSet, ChangeSetIdentity, CheckSum};

/// The run decision for one changeset. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No history record exists; the changeset has never run.
    NotRun,
    /// The changeset already ran and its definition is unchanged.
    AlreadyRun,
    /// The definition changed and the changeset permits re-execution.
    RunAgain,
    /// The definition changed without permission to rerun (drift).
    InvalidChecksum,
}

/// A persisted fact: this identity ran at this time with this checksum.
///
/// Created by the history store at execution time; the reconciler only reads
/// it and patches missing checksums, never deletes or re-dates it. A `None`
/// checksum is a valid legacy state to be healed, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RanChangeSet {
    identity: ChangeSetIdentity,
    checksum: Option<CheckSum>,
    date_executed: DateTime<Utc>,
    deployment_id: Option<String>,
}

impl RanChangeSet {
    pub fn new(
        identity: ChangeSetIdentity,
        checksum: Option<CheckSum>,
        date_executed: DateTime<Utc>,
        deployment_id: Option<String>,
    ) -> Self {
        Self {
            identity,
            checksum,
            date_executed,
            deployment_id,
        }
    }

    pub fn identity(&self) -> &ChangeSetIdentity {
        &self.identity
    }

    pub fn checksum(&self) -> Option<&CheckSum> {
        self.checksum.as_ref()
    }

    pub fn date_executed(&self) -> DateTime<Utc> {
        self.date_executed
    }

    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    /// Whether this record belongs to the given changeset definition.
    pub fn is_same_as(&self, change_set: &ChangeSet) -> bool {
        self.identity == *change_set.identity()
    }

    pub(crate) fn set_checksum(&mut self, checksum: CheckSum) {
        self.checksum = Some(checksum);
    }
}
