use chrono::Utc;

use crate::changeset::{ChangeSet, ChangeSetIdentity, CheckSum, RanChangeSet};
use crate::core::Result;
use crate::history::HistoryStore;

/// In-memory history backend.
///
/// Records are kept in execution order, oldest first. Useful for tests and
/// for engines that load their history from elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    records: Vec<RanChangeSet>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run record for `change_set` executed now.
    pub fn record_executed(
        &mut self,
        change_set: &ChangeSet,
        checksum: Option<CheckSum>,
        deployment_id: Option<String>,
    ) {
        self.records.push(RanChangeSet::new(
            change_set.identity().clone(),
            checksum,
            Utc::now(),
            deployment_id,
        ));
    }

    /// Appends a pre-built record, preserving its execution date.
    pub fn push(&mut self, record: RanChangeSet) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn list(&self) -> Result<Vec<RanChangeSet>> {
        Ok(self.records.clone())
    }

    fn update_checksum(
        &mut self,
        identity: &ChangeSetIdentity,
        checksum: &CheckSum,
    ) -> Result<()> {
        for record in self
            .records
            .iter_mut()
            .filter(|record| record.identity() == identity)
        {
            record.set_checksum(checksum.clone());
        }
        Ok(())
    }
}
