use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::changeset::{ChangeSet, ChangeSetIdentity, CheckSum, RanChangeSet};
use crate::core::{HistoryError, Result};
use crate::history::HistoryStore;

/// JSON-file-backed history store.
///
/// The record list is held in memory and rewritten on every mutation by
/// writing a temp file and renaming it over the old one, so a crash
/// mid-write never leaves a truncated history file.
pub struct FileHistoryStore {
    path: PathBuf,
    records: Vec<RanChangeSet>,
}

impl FileHistoryStore {
    /// Opens the history file, starting empty if it does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.exists() {
            let file = File::open(&path).map_err(|e| {
                HistoryError::StoreUnavailable(format!("Failed to open history file: {}", e))
            })?;
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                HistoryError::MalformedHistory(format!("Failed to parse history file: {}", e))
            })?
        } else {
            Vec::new()
        };

        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a run record for `change_set` executed now and persists it.
    pub fn record_executed(
        &mut self,
        change_set: &ChangeSet,
        checksum: Option<CheckSum>,
        deployment_id: Option<String>,
    ) -> Result<()> {
        self.push(RanChangeSet::new(
            change_set.identity().clone(),
            checksum,
            Utc::now(),
            deployment_id,
        ))
    }

    /// Appends a pre-built record and persists it.
    pub fn push(&mut self, record: RanChangeSet) -> Result<()> {
        self.records.push(record);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    HistoryError::StoreUnavailable(format!(
                        "Failed to create history directory: {}",
                        e
                    ))
                })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let temp_file = File::create(&temp_path).map_err(|e| {
            HistoryError::StoreUnavailable(format!("Failed to create temp history file: {}", e))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &self.records).map_err(|e| {
            HistoryError::StoreUnavailable(format!("Failed to serialize history: {}", e))
        })?;
        writer.flush().map_err(|e| {
            HistoryError::StoreUnavailable(format!("Failed to flush history: {}", e))
        })?;
        writer.get_mut().sync_all().map_err(|e| {
            HistoryError::StoreUnavailable(format!("Failed to sync history: {}", e))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            HistoryError::StoreUnavailable(format!("Failed to rename history file: {}", e))
        })?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn list(&self) -> Result<Vec<RanChangeSet>> {
        Ok(self.records.clone())
    }

    fn update_checksum(
        &mut self,
        identity: &ChangeSetIdentity,
        checksum: &CheckSum,
    ) -> Result<()> {
        let mut changed = false;
        for record in self
            .records
            .iter_mut()
            .filter(|record| record.identity() == identity)
        {
            record.set_checksum(checksum.clone());
            changed = true;
        }
        if changed {
            self.save()?;
        }
        Ok(())
    }
}
