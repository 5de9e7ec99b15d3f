//! Integration tests for the bulk checksum-repair pass

use std::sync::Arc;

use changeledger::{
    ChangeLog, ChangeSet, ChangeSetIdentity, CheckSum, ChecksumFn, ExecutionContext, HistoryError,
    HistoryReconciler, HistoryStore, MemoryHistoryStore, RanChangeSet, Result,
};

struct CountingStore {
    inner: MemoryHistoryStore,
    updates: usize,
}

impl CountingStore {
    fn new(inner: MemoryHistoryStore) -> Self {
        Self { inner, updates: 0 }
    }
}

impl HistoryStore for CountingStore {
    fn list(&self) -> Result<Vec<RanChangeSet>> {
        self.inner.list()
    }

    fn update_checksum(
        &mut self,
        identity: &ChangeSetIdentity,
        checksum: &CheckSum,
    ) -> Result<()> {
        self.updates += 1;
        self.inner.update_checksum(identity, checksum)
    }
}

/// Lists fine but fails every write, to show a failing pass aborts early.
struct ReadOnlyStore {
    inner: MemoryHistoryStore,
    attempted_updates: usize,
}

impl HistoryStore for ReadOnlyStore {
    fn list(&self) -> Result<Vec<RanChangeSet>> {
        self.inner.list()
    }

    fn update_checksum(&mut self, _: &ChangeSetIdentity, _: &CheckSum) -> Result<()> {
        self.attempted_updates += 1;
        Err(HistoryError::StoreUnavailable("read-only".to_string()))
    }
}

fn checksum_fn() -> ChecksumFn {
    Arc::new(|cs: &ChangeSet| CheckSum::new(1, cs.body().to_string()))
}

fn change_set(id: &str, body: &str) -> ChangeSet {
    let identity = ChangeSetIdentity::new(id, "a", "db/changelog.xml").unwrap();
    ChangeSet::new(identity, body)
}

#[test]
fn repairs_only_records_missing_a_checksum() {
    let healed = change_set("1", "abc");
    let intact = change_set("2", "def");
    let changelog = ChangeLog::new("db/changelog.xml")
        .with(healed.clone())
        .unwrap()
        .with(intact.clone())
        .unwrap();

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&healed, None, None);
    store.record_executed(&intact, Some(CheckSum::new(1, "recorded")), None);

    let mut reconciler = HistoryReconciler::new(store, checksum_fn());
    reconciler
        .repair_checksums(&changelog, &ExecutionContext::none(), "postgresql")
        .unwrap();

    let records = reconciler.store().list().unwrap();
    assert_eq!(records[0].checksum(), Some(&CheckSum::new(1, "abc")));
    // The record that already had a checksum is untouched, even though its
    // value differs from the current definition.
    assert_eq!(records[1].checksum(), Some(&CheckSum::new(1, "recorded")));
}

#[test]
fn repair_is_idempotent() {
    let cs = change_set("1", "abc");
    let changelog = ChangeLog::new("db/changelog.xml").with(cs.clone()).unwrap();

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&cs, None, None);

    let mut reconciler = HistoryReconciler::new(CountingStore::new(store), checksum_fn());
    let context = ExecutionContext::none();

    reconciler
        .repair_checksums(&changelog, &context, "postgresql")
        .unwrap();
    assert_eq!(reconciler.store().updates, 1);

    // Second pass with unchanged inputs finds nothing to do.
    reconciler
        .repair_checksums(&changelog, &context, "postgresql")
        .unwrap();
    assert_eq!(reconciler.store().updates, 1);
}

#[test]
fn record_without_a_current_definition_is_skipped() {
    let cs = change_set("1", "abc");
    // The changelog no longer contains changeset "1".
    let changelog = ChangeLog::new("db/changelog.xml");

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&cs, None, None);

    let mut reconciler = HistoryReconciler::new(CountingStore::new(store), checksum_fn());
    reconciler
        .repair_checksums(&changelog, &ExecutionContext::none(), "postgresql")
        .unwrap();

    assert_eq!(reconciler.store().updates, 0);
    assert!(reconciler.store().list().unwrap()[0].checksum().is_none());
}

#[test]
fn context_rejected_definition_is_not_repaired() {
    let cs = change_set("1", "abc").with_contexts(["test"]);
    let changelog = ChangeLog::new("db/changelog.xml").with(cs.clone()).unwrap();

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&cs, None, None);

    let mut reconciler = HistoryReconciler::new(CountingStore::new(store), checksum_fn());
    reconciler
        .repair_checksums(&changelog, &ExecutionContext::new(["prod"]), "postgresql")
        .unwrap();

    assert_eq!(reconciler.store().updates, 0);
}

#[test]
fn dbms_rejected_definition_is_not_repaired() {
    let cs = change_set("1", "abc").with_dbms(["oracle"]);
    let changelog = ChangeLog::new("db/changelog.xml").with(cs.clone()).unwrap();

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&cs, None, None);

    let mut reconciler = HistoryReconciler::new(CountingStore::new(store), checksum_fn());
    reconciler
        .repair_checksums(&changelog, &ExecutionContext::none(), "postgresql")
        .unwrap();

    assert_eq!(reconciler.store().updates, 0);
}

#[test]
fn accepted_definition_is_repaired_under_matching_settings() {
    let cs = change_set("1", "abc")
        .with_contexts(["prod"])
        .with_dbms(["postgresql"]);
    let changelog = ChangeLog::new("db/changelog.xml").with(cs.clone()).unwrap();

    let mut store = MemoryHistoryStore::new();
    store.record_executed(&cs, None, None);

    let mut reconciler = HistoryReconciler::new(store, checksum_fn());
    reconciler
        .repair_checksums(&changelog, &ExecutionContext::new(["prod"]), "postgresql")
        .unwrap();

    let records = reconciler.store().list().unwrap();
    assert_eq!(records[0].checksum(), Some(&CheckSum::new(1, "abc")));
}

#[test]
fn store_failure_aborts_the_remaining_pass() {
    let first = change_set("1", "abc");
    let second = change_set("2", "def");
    let changelog = ChangeLog::new("db/changelog.xml")
        .with(first.clone())
        .unwrap()
        .with(second.clone())
        .unwrap();

    let mut inner = MemoryHistoryStore::new();
    inner.record_executed(&first, None, None);
    inner.record_executed(&second, None, None);

    let store = ReadOnlyStore {
        inner,
        attempted_updates: 0,
    };
    let mut reconciler = HistoryReconciler::new(store, checksum_fn());

    let result = reconciler.repair_checksums(&changelog, &ExecutionContext::none(), "postgresql");
    assert!(matches!(result, Err(HistoryError::StoreUnavailable(_))));

    // The loop stopped at the first failing write instead of retrying the
    // rest of the records.
    assert_eq!(reconciler.store().attempted_updates, 1);
}
