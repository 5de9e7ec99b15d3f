use super::{AcceptanceFilter, FilterResult};
use crate::changeset::ChangeSet;

/// Accepts changesets by target database platform.
///
/// A declared dbms entry with a leading `!` excludes that platform; `all`
/// matches every platform and `none` matches no platform. An empty dbms
/// list accepts everything.
pub struct DbmsFilter {
    platform: String,
}

impl DbmsFilter {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into().trim().to_lowercase(),
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }
}

impl AcceptanceFilter for DbmsFilter {
    fn accepts(&self, change_set: &ChangeSet) -> FilterResult {
        if change_set.dbms().is_empty() {
            return FilterResult::accepted("changeset declares no dbms");
        }

        let mut listed = false;
        let mut has_positive = false;

        for entry in change_set.dbms() {
            let entry = entry.trim().to_lowercase();
            if let Some(excluded) = entry.strip_prefix('!') {
                if excluded == self.platform {
                    return FilterResult::rejected(format!(
                        "platform '{}' is excluded by {}",
                        self.platform, change_set
                    ));
                }
                continue;
            }
            if entry == "none" {
                return FilterResult::rejected(format!("{} runs on no platform", change_set));
            }
            has_positive = true;
            if entry == "all" || entry == self.platform {
                listed = true;
            }
        }

        if !has_positive || listed {
            FilterResult::accepted(format!("platform '{}' is accepted", self.platform))
        } else {
            FilterResult::rejected(format!(
                "platform '{}' is not listed by {}",
                self.platform, change_set
            ))
        }
    }
}
