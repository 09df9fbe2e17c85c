use crate::utils::error::Result;
use crate::utils::validation::validate_component_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Port name to contract identifier.
pub type PortMap = BTreeMap<String, String>;

/// Hierarchical component name such as `maths_boolean_nand` or `maths.boolean.nand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    raw: String,
    segments: Vec<String>,
}

impl ComponentName {
    pub fn parse(raw: &str) -> Result<Self> {
        validate_component_name("component_name", raw)?;
        let segments = raw
            .split(['_', '.'])
            .map(str::to_string)
            .collect();
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Identifier used for the crate, the `component!` block and the registry key.
    pub fn ident(&self) -> String {
        self.segments.join("_")
    }

    /// Directory of the component relative to the components root.
    pub fn relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// `/`-joined path as it appears inside generated Nix files.
    pub fn nix_path(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortGroupKind {
    Inputs,
    InputsArray,
    Outputs,
    OutputsArray,
}

impl PortGroupKind {
    pub const ALL: [PortGroupKind; 4] = [
        PortGroupKind::Inputs,
        PortGroupKind::InputsArray,
        PortGroupKind::Outputs,
        PortGroupKind::OutputsArray,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PortGroupKind::Inputs => "inputs",
            PortGroupKind::InputsArray => "inputs_array",
            PortGroupKind::Outputs => "outputs",
            PortGroupKind::OutputsArray => "outputs_array",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortGroups {
    #[serde(default)]
    pub inputs: PortMap,
    #[serde(default)]
    pub inputs_array: PortMap,
    #[serde(default)]
    pub outputs: PortMap,
    #[serde(default)]
    pub outputs_array: PortMap,
}

impl PortGroups {
    pub fn group(&self, kind: PortGroupKind) -> &PortMap {
        match kind {
            PortGroupKind::Inputs => &self.inputs,
            PortGroupKind::InputsArray => &self.inputs_array,
            PortGroupKind::Outputs => &self.outputs,
            PortGroupKind::OutputsArray => &self.outputs_array,
        }
    }

    /// Groups in declaration order: inputs, inputs_array, outputs, outputs_array.
    pub fn iter(&self) -> impl Iterator<Item = (PortGroupKind, &PortMap)> {
        PortGroupKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.group(kind)))
    }

    pub fn port_count(&self) -> usize {
        self.iter().map(|(_, ports)| ports.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraPorts {
    pub option: String,
    pub acc: String,
    pub portal: bool,
}

/// A validated request for a new component. Read-only once built.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    pub name: ComponentName,
    pub description: String,
    pub ports: PortGroups,
    pub cargo_deps: BTreeMap<String, String>,
    pub external_deps: BTreeMap<String, Vec<String>>,
    pub extra_ports: ExtraPorts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub manifest: String,
    pub descriptor: String,
    pub stub: String,
    pub registry_entry: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_component_name_translation() {
        let name = ComponentName::parse("maths_boolean_nand").unwrap();
        assert_eq!(name.ident(), "maths_boolean_nand");
        assert_eq!(name.relative_path(), Path::new("maths/boolean/nand"));
        assert_eq!(name.nix_path(), "maths/boolean/nand");
    }

    #[test]
    fn test_dotted_name_normalises_ident() {
        let name = ComponentName::parse("db.rusticdb.bucket").unwrap();
        assert_eq!(name.ident(), "db_rusticdb_bucket");
        assert_eq!(name.to_string(), "db.rusticdb.bucket");
        assert_eq!(name.relative_path(), Path::new("db/rusticdb/bucket"));
    }

    #[test]
    fn test_port_groups_iterate_in_fixed_order() {
        let labels: Vec<_> = PortGroups::default()
            .iter()
            .map(|(kind, _)| kind.label())
            .collect();
        assert_eq!(labels, ["inputs", "inputs_array", "outputs", "outputs_array"]);
    }
}
