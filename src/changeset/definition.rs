use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{HistoryError, Result};

/// Stable identity of a changeset: logical id + author + source file path.
///
/// Within one changelog an identity resolves to at most one changeset and at
/// most one history record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeSetIdentity {
    id: String,
    author: String,
    file_path: String,
}

impl ChangeSetIdentity {
    /// Builds an identity, rejecting empty id or author.
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let author = author.into();

        if id.trim().is_empty() {
            return Err(HistoryError::InvalidIdentity(
                "changeset id must not be empty".to_string(),
            ));
        }
        if author.trim().is_empty() {
            return Err(HistoryError::InvalidIdentity(format!(
                "changeset '{}' has no author",
                id
            )));
        }

        Ok(Self {
            id,
            author,
            file_path: file_path.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Structural validity check for identities that bypassed [`Self::new`],
    /// e.g. records deserialized from a history file.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.author.trim().is_empty()
    }
}

impl fmt::Display for ChangeSetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.file_path, self.id, self.author)
    }
}

/// An immutable migration unit definition.
///
/// The `body` is the content the injected checksum strategy hashes; the
/// declared contexts and dbms list are consumed by the acceptance filters.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    identity: ChangeSetIdentity,
    body: String,
    run_on_change: bool,
    contexts: Vec<String>,
    dbms: Vec<String>,
}

impl ChangeSet {
    pub fn new(identity: ChangeSetIdentity, body: impl Into<String>) -> Self {
        Self {
            identity,
            body: body.into(),
            run_on_change: false,
            contexts: Vec::new(),
            dbms: Vec::new(),
        }
    }

    /// Marks the changeset as re-executable when its definition changes.
    pub fn run_on_change(mut self) -> Self {
        self.run_on_change = true;
        self
    }

    /// Declares the execution contexts this changeset belongs to.
    pub fn with_contexts<I, S>(mut self, contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contexts = contexts.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the database platforms this changeset applies to. A leading
    /// `!` excludes a platform; `all` and `none` are wildcards.
    pub fn with_dbms<I, S>(mut self, dbms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dbms = dbms.into_iter().map(Into::into).collect();
        self
    }

    pub fn identity(&self) -> &ChangeSetIdentity {
        &self.identity
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn should_run_on_change(&self) -> bool {
        self.run_on_change
    }

    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    pub fn dbms(&self) -> &[String] {
        &self.dbms
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}
