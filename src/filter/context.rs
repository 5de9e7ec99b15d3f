use super::{AcceptanceFilter, FilterResult};
use crate::changeset::ChangeSet;

/// The set of context names active for one migration invocation.
///
/// Names are matched case-insensitively; an empty set means "no contexts
/// requested", which accepts every changeset.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    contexts: Vec<String>,
}

impl ExecutionContext {
    pub fn new<I, S>(contexts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contexts: contexts
                .into_iter()
                .map(|c| c.into().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// An empty context set.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn matches(&self, declared: &str) -> bool {
        let declared = declared.trim().to_lowercase();
        self.contexts.iter().any(|c| *c == declared)
    }
}

/// Accepts changesets whose declared contexts overlap the runtime contexts.
pub struct ContextFilter {
    context: ExecutionContext,
}

impl ContextFilter {
    pub fn new(context: ExecutionContext) -> Self {
        Self { context }
    }
}

impl AcceptanceFilter for ContextFilter {
    fn accepts(&self, change_set: &ChangeSet) -> FilterResult {
        if change_set.contexts().is_empty() {
            return FilterResult::accepted("changeset declares no contexts");
        }
        if self.context.is_empty() {
            return FilterResult::accepted("no runtime contexts set");
        }
        if change_set
            .contexts()
            .iter()
            .any(|declared| self.context.matches(declared))
        {
            FilterResult::accepted("declared context matches a runtime context")
        } else {
            FilterResult::rejected(format!(
                "no declared context of {} matches the runtime contexts",
                change_set
            ))
        }
    }
}
