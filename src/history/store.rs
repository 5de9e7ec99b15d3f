use crate::changeset::{ChangeSetIdentity, CheckSum, RanChangeSet};
use crate::core::Result;

/// History store capability - each backend supplies its own persistence.
///
/// Every call may block on I/O and may fail; the reconciler issues calls
/// strictly sequentially and propagates failures without retrying. The store
/// is expected to serialize concurrent writers itself.
pub trait HistoryStore: Send + Sync {
    /// All run records, in execution order, oldest first.
    fn list(&self) -> Result<Vec<RanChangeSet>>;

    /// Replaces the recorded checksum for one identity.
    ///
    /// Repeat-safe: calling again with the same value is a no-op, and
    /// matching zero records succeeds without effect, like a SQL UPDATE
    /// whose WHERE clause matches nothing.
    fn update_checksum(
        &mut self,
        identity: &ChangeSetIdentity,
        checksum: &CheckSum,
    ) -> Result<()>;
}
