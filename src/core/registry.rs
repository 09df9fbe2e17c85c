//! The central component registry (`components/default.nix`).
//!
//! Only the lines between the two sentinels are managed; everything before
//! (sentinel included) and after (sentinel included) is kept verbatim.
//! Running two generators against the same registry at once is not supported.

use crate::domain::model::ComponentName;
use crate::utils::error::{Result, ScaffoldError};
use std::path::Path;

pub const REGISTRY_START: &str =
    "self = rec { # use one line only to insert a component (utils/new_component.py sorts this list)";
pub const REGISTRY_END: &str =
    "}; # use one line only to insert a component (utils/new_component.py sorts this list)";

pub fn registry_entry(name: &ComponentName) -> String {
    format!("  {} = callPackage ./{} {{}};", name.ident(), name.nix_path())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    header: Vec<String>,
    entries: Vec<String>,
    footer: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Region {
    Header,
    Entries,
    Footer,
}

fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == marker
}

impl Registry {
    /// Splits `content` into its three regions. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut registry = Self {
            header: Vec::new(),
            entries: Vec::new(),
            footer: Vec::new(),
        };
        let mut region = Region::Header;

        for line in content.split_terminator('\n') {
            match region {
                Region::Header => {
                    registry.header.push(line.to_string());
                    if is_marker(line, REGISTRY_START) {
                        region = Region::Entries;
                    }
                }
                Region::Entries => {
                    if is_marker(line, REGISTRY_END) {
                        region = Region::Footer;
                        registry.footer.push(line.to_string());
                    } else {
                        registry.entries.push(line.to_string());
                    }
                }
                Region::Footer => registry.footer.push(line.to_string()),
            }
        }

        let missing = match region {
            Region::Header => Some(REGISTRY_START),
            Region::Entries => Some(REGISTRY_END),
            Region::Footer => None,
        };
        if let Some(marker) = missing {
            return Err(ScaffoldError::RegistrySentinelMissing {
                path: path.to_path_buf(),
                marker: marker.to_string(),
            });
        }

        Ok(registry)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True if some entry already binds `ident`.
    pub fn contains(&self, ident: &str) -> bool {
        self.entries.iter().any(|entry| {
            entry
                .split_once('=')
                .is_some_and(|(key, _)| key.trim() == ident)
        })
    }

    /// Appends `entry` and re-sorts the whole list by full line text.
    pub fn insert(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        self.entries.sort();
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.header.iter().chain(&self.entries).chain(&self.footer) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
