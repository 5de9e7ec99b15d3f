use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed history record: {0}")]
    MalformedHistory(String),

    #[error("Invalid changeset identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid checksum format: '{0}'")]
    ChecksumFormat(String),

    #[error("Changeset '{0}' already exists in the changelog")]
    DuplicateChangeSet(String),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
