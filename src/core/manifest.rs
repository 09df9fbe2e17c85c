use crate::core::template::{Bindings, Template};
use crate::domain::model::ComponentName;
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// Always listed first, ahead of the component's own dependencies.
pub const FRAMEWORK_DEPENDENCIES: [(&str, &str); 2] = [("rustfbp", "*"), ("capnp", "*")];

const MANIFEST: Template = Template::new(
    "Cargo.toml",
    r#"[package]
name = "{{name}}"
version = "0.1.0"
authors = ["test <test@test.com>"]

[lib]
name = "{{name}}"
crate-type = ["dylib"]

[dependencies]
{{dependencies}}
"#,
);

/// `name = "version"` lines. Duplicates of the framework crates are not filtered.
pub fn dependency_lines(cargo_deps: &BTreeMap<String, String>) -> String {
    FRAMEWORK_DEPENDENCIES
        .iter()
        .map(|(name, version)| (*name, *version))
        .chain(
            cargo_deps
                .iter()
                .map(|(name, version)| (name.as_str(), version.as_str())),
        )
        .map(|(name, version)| format!("{} = \"{}\"", name, version))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn generate_manifest(name: &ComponentName, cargo_deps: &BTreeMap<String, String>) -> Result<String> {
    MANIFEST.render(
        &Bindings::new()
            .set("name", name.ident())
            .set("dependencies", dependency_lines(cargo_deps)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_with_only_framework_dependencies() {
        let name = ComponentName::parse("maths_boolean_nand").unwrap();
        let manifest = generate_manifest(&name, &BTreeMap::new()).unwrap();

        assert_eq!(
            manifest,
            r#"[package]
name = "maths_boolean_nand"
version = "0.1.0"
authors = ["test <test@test.com>"]

[lib]
name = "maths_boolean_nand"
crate-type = ["dylib"]

[dependencies]
rustfbp = "*"
capnp = "*"
"#
        );
    }

    #[test]
    fn test_user_dependencies_follow_framework_ones() {
        let mut deps = BTreeMap::new();
        deps.insert("rustc-serialize".to_string(), "0.3".to_string());
        deps.insert("nanomsg".to_string(), "*".to_string());

        let lines = dependency_lines(&deps);
        assert_eq!(
            lines,
            "rustfbp = \"*\"\ncapnp = \"*\"\nnanomsg = \"*\"\nrustc-serialize = \"0.3\""
        );
    }

    #[test]
    fn test_dotted_name_uses_ident_for_package() {
        let name = ComponentName::parse("net.http").unwrap();
        let manifest = generate_manifest(&name, &BTreeMap::new()).unwrap();
        assert!(manifest.contains("name = \"net_http\""));
    }
}
