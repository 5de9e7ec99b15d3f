use chrono::{DateTime, Utc};
use log::{debug, info};

use super::{DeploymentId, HistoryStore};
use crate::changelog::ChangeLog;
use crate::changeset::{ChangeSet, CheckSum, ChecksumFn, RanChangeSet, RunStatus};
use crate::core::{HistoryError, Result};
use crate::filter::{AcceptanceFilter, ContextFilter, DbmsFilter, ExecutionContext};

/// One reconciliation session against a history store.
///
/// Decides for each changeset whether it still needs to run, heals history
/// records that predate checksum recording, and holds the session-scoped
/// deployment identity. Store calls are issued strictly sequentially; any
/// store failure aborts the current operation.
pub struct HistoryReconciler<S: HistoryStore> {
    store: S,
    checksum_fn: ChecksumFn,
    deployment_id: DeploymentId,
}

impl<S: HistoryStore> HistoryReconciler<S> {
    pub fn new(store: S, checksum_fn: ChecksumFn) -> Self {
        Self {
            store,
            checksum_fn,
            deployment_id: DeploymentId::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The deployment identity of this session.
    pub fn deployment_id(&mut self) -> &mut DeploymentId {
        &mut self.deployment_id
    }

    /// Computes the current checksum of a changeset via the injected
    /// strategy.
    pub fn checksum_of(&self, change_set: &ChangeSet) -> CheckSum {
        (self.checksum_fn)(change_set)
    }

    /// Decides whether `change_set` still needs to run.
    ///
    /// A matched record with a missing checksum is healed in place (the
    /// current checksum is computed and persisted) and reported as
    /// [`RunStatus::AlreadyRun`]; that is a repair side effect, not a
    /// re-execution.
    pub fn run_status(&mut self, change_set: &ChangeSet) -> Result<RunStatus> {
        let Some(found) = self.ran_change_set(change_set)? else {
            return Ok(RunStatus::NotRun);
        };

        let Some(recorded) = found.checksum() else {
            info!("Updating missing checksum for {}", change_set);
            self.replace_checksum(change_set)?;
            return Ok(RunStatus::AlreadyRun);
        };

        if *recorded == self.checksum_of(change_set) {
            Ok(RunStatus::AlreadyRun)
        } else if change_set.should_run_on_change() {
            Ok(RunStatus::RunAgain)
        } else {
            Ok(RunStatus::InvalidChecksum)
        }
    }

    /// The history record matching `change_set`, if any.
    ///
    /// Absence is a normal outcome, not a failure. First match wins if the
    /// store ever returns duplicate identities. A record with an empty id or
    /// author fails the whole call: the history is untrustworthy.
    pub fn ran_change_set(&self, change_set: &ChangeSet) -> Result<Option<RanChangeSet>> {
        for ran in self.store.list()? {
            if !ran.identity().is_well_formed() {
                return Err(HistoryError::MalformedHistory(format!(
                    "history record '{}' has an empty id or author",
                    ran.identity()
                )));
            }
            if ran.is_same_as(change_set) {
                return Ok(Some(ran));
            }
        }
        Ok(None)
    }

    /// When the matching record last executed, if any.
    pub fn ran_date(&self, change_set: &ChangeSet) -> Result<Option<DateTime<Utc>>> {
        Ok(self.ran_change_set(change_set)?.map(|ran| ran.date_executed()))
    }

    /// Backfills checksums for history records that predate checksum
    /// recording.
    ///
    /// Only records whose definition still exists in `changelog` and passes
    /// both the context filter and the dbms filter are touched; everything
    /// else is left for a later pass. Idempotent: a second pass with
    /// unchanged inputs finds no missing checksums and mutates nothing. A
    /// store failure aborts the remaining loop.
    pub fn repair_checksums(
        &mut self,
        changelog: &ChangeLog,
        context: &ExecutionContext,
        platform: &str,
    ) -> Result<()> {
        let context_filter = ContextFilter::new(context.clone());
        let dbms_filter = DbmsFilter::new(platform);

        for ran in self.store.list()? {
            if ran.checksum().is_some() {
                continue;
            }
            let Some(change_set) = changelog.get(ran.identity()) else {
                // Removed or renamed changeset; nothing to recompute from.
                continue;
            };
            if !context_filter.accepts(change_set).is_accepted()
                || !dbms_filter.accepts(change_set).is_accepted()
            {
                continue;
            }

            debug!(
                "Updating missing checksum on changeset {} to the current value",
                change_set
            );
            self.replace_checksum(change_set)?;
        }
        Ok(())
    }

    fn replace_checksum(&mut self, change_set: &ChangeSet) -> Result<()> {
        let checksum = self.checksum_of(change_set);
        self.store.update_checksum(change_set.identity(), &checksum)
    }
}
