mod context;
mod dbms;

pub use context::{ContextFilter, ExecutionContext};
pub use dbms::DbmsFilter;

use crate::changeset::ChangeSet;

/// Outcome of an acceptance check, with a human-readable reason.
#[derive(Debug, Clone)]
pub struct FilterResult {
    accepted: bool,
    reason: String,
}

impl FilterResult {
    pub fn accepted(reason: impl Into<String>) -> Self {
        Self {
            accepted: true,
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Capability boundary for deciding whether a changeset may run under the
/// current execution settings.
pub trait AcceptanceFilter: Send + Sync {
    fn accepts(&self, change_set: &ChangeSet) -> FilterResult;
}
