// ============================================================================
// ChangeLedger Library
// ============================================================================

//! Changeset run-history tracking for schema migrations.
//!
//! A migration engine feeds every changeset it is about to execute through a
//! [`HistoryReconciler`], which compares the definition against the durable
//! run history and answers with a [`RunStatus`]: run it, skip it, rerun it,
//! or refuse because an already-applied changeset was edited (drift).
//!
//! The history itself lives behind the [`HistoryStore`] capability; this
//! crate ships an in-memory backend and a JSON-file backend, and database
//! backends plug in by implementing the same two operations. Checksum
//! computation is an injected strategy ([`ChecksumFn`]) — the reconciler
//! only compares and stores values, it never owns the hash algorithm.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use changeledger::{
//!     ChangeSet, ChangeSetIdentity, CheckSum, ChecksumFn, HistoryReconciler,
//!     MemoryHistoryStore, RunStatus,
//! };
//!
//! # fn main() -> changeledger::Result<()> {
//! let checksum_fn: ChecksumFn =
//!     Arc::new(|cs: &ChangeSet| CheckSum::new(1, format!("{:08x}", cs.body().len())));
//!
//! let identity = ChangeSetIdentity::new("1", "alice", "db/changelog.xml")?;
//! let change_set = ChangeSet::new(identity, "CREATE TABLE users (id INTEGER)");
//!
//! let mut reconciler = HistoryReconciler::new(MemoryHistoryStore::new(), checksum_fn);
//! assert_eq!(reconciler.run_status(&change_set)?, RunStatus::NotRun);
//! # Ok(())
//! # }
//! ```

pub mod changelog;
pub mod changeset;
pub mod core;
pub mod filter;
pub mod history;
pub mod store;

// Re-export main types for convenience
pub use changelog::ChangeLog;
pub use changeset::{ChangeSet, ChangeSetIdentity, CheckSum, ChecksumFn, RanChangeSet, RunStatus};
pub use core::{HistoryError, Result};
pub use filter::{AcceptanceFilter, ContextFilter, DbmsFilter, ExecutionContext, FilterResult};
pub use history::{DeploymentId, HistoryReconciler, HistoryStore};
pub use store::{FileHistoryStore, MemoryHistoryStore};
