pub mod checksum;
pub mod definition;
pub mod ran;

pub use checksum::{CheckSum, ChecksumFn};
pub use definition::{ChangeSet, ChangeSetIdentity};
pub use ran::{RanChangeSet, RunStatus};
