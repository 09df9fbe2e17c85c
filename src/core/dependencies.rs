use std::collections::{BTreeMap, BTreeSet};

/// Native/system dependencies flattened across groups and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalDependencySet {
    identifiers: BTreeSet<String>,
}

impl ExternalDependencySet {
    pub fn from_groups(groups: &BTreeMap<String, Vec<String>>) -> Self {
        let identifiers = groups.values().flatten().cloned().collect();
        Self { identifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub fn comment_listing(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!(
            "# external dependencies:\n, {}",
            self.iter().collect::<Vec<_>>().join(", ")
        )
    }

    pub fn build_inputs(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!(
            "buildInputs = [ {} ];",
            self.iter().collect::<Vec<_>>().join(" ")
        )
    }
}
