use crate::changeset::{ChangeSet, ChangeSetIdentity};
use crate::core::{HistoryError, Result};

/// The current changeset definitions of one changelog file.
///
/// Holds definitions in declaration order and resolves them by identity.
/// Duplicate identities are rejected at insertion, so lookups are
/// unambiguous by construction.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    file_path: String,
    change_sets: Vec<ChangeSet>,
}

impl ChangeLog {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            change_sets: Vec::new(),
        }
    }

    /// Adds a changeset definition, rejecting duplicate identities.
    pub fn add(&mut self, change_set: ChangeSet) -> Result<()> {
        if self.get(change_set.identity()).is_some() {
            return Err(HistoryError::DuplicateChangeSet(
                change_set.identity().to_string(),
            ));
        }
        self.change_sets.push(change_set);
        Ok(())
    }

    /// Fluent builder method to add a changeset.
    pub fn with(mut self, change_set: ChangeSet) -> Result<Self> {
        self.add(change_set)?;
        Ok(self)
    }

    /// Resolves a changeset definition by identity.
    pub fn get(&self, identity: &ChangeSetIdentity) -> Option<&ChangeSet> {
        self.change_sets
            .iter()
            .find(|cs| cs.identity() == identity)
    }

    pub fn change_sets(&self) -> &[ChangeSet] {
        &self.change_sets
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn len(&self) -> usize {
        self.change_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.change_sets.is_empty()
    }
}
