use crate::domain::model::PortGroups;
use std::collections::BTreeSet;

/// Distinct contract identifiers referenced by any port, in alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSet {
    contracts: BTreeSet<String>,
}

impl ContractSet {
    pub fn from_ports(ports: &PortGroups) -> Self {
        let contracts = ports
            .iter()
            .flat_map(|(_, group)| group.values().cloned())
            .collect();
        Self { contracts }
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.contracts.iter().map(String::as_str)
    }

    /// Space separated, for a Nix list literal.
    pub fn nix_contracts(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    /// Comma separated, for the `contracts(...)` argument list.
    pub fn rust_contracts(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }

    /// Extra parameters for the Nix function header; empty when there are no contracts.
    pub fn nix_header(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("# contracts:\n, {}", self.rust_contracts())
    }
}
