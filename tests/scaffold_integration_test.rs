use anyhow::Result;
use fbp_new_component::core::registry::{REGISTRY_END, REGISTRY_START};
use fbp_new_component::{
    CargoLockTool, ComponentConfig, LocalStorage, LockfileStatus, ScaffoldEngine,
    ScaffoldError, ScaffoldOptions,
};
use tempfile::TempDir;

const NAND_SPEC: &str = r#"
component_name = "maths_boolean_nand"
component_description = "Boolean NAND gate"

[ports.inputs]
a = "BoolContract"
b = "BoolContract"

[ports.outputs]
out = "BoolContract"

["extra ports"]
option = ""
acc = ""
portal = "false"
"#;

fn registry_text() -> String {
    format!(
        "{{ pkgs, support, ... }}:\nlet\n  callPackage = pkgs.lib.callPackageWith (pkgs // support // self);\n{}\n  maths_boolean_and = callPackage ./maths/boolean/and {{}};\n  maths_boolean_not = callPackage ./maths/boolean/not {{}};\n{}\nin\nself\n",
        REGISTRY_START, REGISTRY_END
    )
}

fn components_root() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("default.nix"), registry_text())?;
    Ok(temp_dir)
}

fn engine(root: &TempDir) -> ScaffoldEngine<LocalStorage, CargoLockTool> {
    let options = ScaffoldOptions {
        skip_lockfile: true,
        ..ScaffoldOptions::default()
    };
    ScaffoldEngine::new(LocalStorage::new(root.path()), CargoLockTool::default(), options)
}

#[tokio::test]
async fn test_nand_component_end_to_end() -> Result<()> {
    let root = components_root()?;
    let spec = ComponentConfig::from_toml_str(NAND_SPEC)?.into_spec()?;

    let report = engine(&root).run(&spec).await?;
    assert!(matches!(report.lockfile, LockfileStatus::Skipped));

    let dir = root.path().join("maths/boolean/nand");
    let manifest = std::fs::read_to_string(dir.join("Cargo.toml"))?;
    let descriptor = std::fs::read_to_string(dir.join("default.nix"))?;
    let stub = std::fs::read_to_string(dir.join("src/lib.rs"))?;

    // Manifest only carries the framework dependencies.
    let dependencies = manifest
        .split("[dependencies]\n")
        .nth(1)
        .unwrap_or_default();
    assert_eq!(dependencies, "rustfbp = \"*\"\ncapnp = \"*\"\n");

    assert!(descriptor.contains("contracts = [BoolContract];"));
    assert!(descriptor.contains("# contracts:\n, BoolContract\n, ...}:"));
    assert!(!descriptor.contains("buildInputs"));
    assert!(descriptor.contains("description = \"Component: Boolean NAND gate\";"));

    assert!(stub.contains("maths_boolean_nand, contracts(BoolContract)"));
    assert!(stub.contains("inputs(a: BoolContract, b: BoolContract),"));
    assert!(stub.contains("outputs(out: BoolContract),"));
    assert_eq!(stub.matches("self.ports.recv(").count(), 2);
    assert_eq!(stub.matches("self.ports.send(").count(), 1);
    assert!(!stub.contains("portal"));

    let registry = std::fs::read_to_string(root.path().join("default.nix"))?;
    assert!(registry.contains(
        "  maths_boolean_and = callPackage ./maths/boolean/and {};\n  maths_boolean_nand = callPackage ./maths/boolean/nand {};\n  maths_boolean_not = callPackage ./maths/boolean/not {};\n"
    ));
    assert!(registry.ends_with(&format!("{}\nin\nself\n", REGISTRY_END)));

    Ok(())
}

#[tokio::test]
async fn test_second_run_is_rejected_and_changes_nothing() -> Result<()> {
    let root = components_root()?;
    let spec = ComponentConfig::from_toml_str(NAND_SPEC)?.into_spec()?;
    let engine = engine(&root);

    engine.run(&spec).await?;
    let registry_after_first = std::fs::read_to_string(root.path().join("default.nix"))?;
    let stub_after_first =
        std::fs::read_to_string(root.path().join("maths/boolean/nand/src/lib.rs"))?;

    let err = engine.run(&spec).await.unwrap_err();
    assert!(matches!(err, ScaffoldError::ComponentAlreadyExists { .. }));
    assert_eq!(err.exit_code(), 1);

    assert_eq!(
        std::fs::read_to_string(root.path().join("default.nix"))?,
        registry_after_first
    );
    assert_eq!(
        std::fs::read_to_string(root.path().join("maths/boolean/nand/src/lib.rs"))?,
        stub_after_first
    );
    Ok(())
}

#[tokio::test]
async fn test_portal_flag_end_to_end() -> Result<()> {
    let root = components_root()?;
    let spec = ComponentConfig::from_toml_str(
        r#"
component_name = "db_rusticdb_bucket"
component_description = "Key value bucket"

[ports.inputs]
operation = "tuple"

[ports.outputs]
output = "generic_text"

["extra ports"]
option = "generic_text"
acc = "generic_text"
portal = "true"

["cargo dependencies"]
rustc-serialize = "0.3"

["external dependencies"]
storage = ["lmdb", "sqlite"]
runtime = ["sqlite"]
"#,
    )?
    .into_spec()?;

    engine(&root).run(&spec).await?;

    let dir = root.path().join("db/rusticdb/bucket");
    let stub = std::fs::read_to_string(dir.join("src/lib.rs"))?;
    let descriptor = std::fs::read_to_string(dir.join("default.nix"))?;
    let manifest = std::fs::read_to_string(dir.join("Cargo.toml"))?;

    assert!(stub.contains("  option(generic_text),\n  acc(generic_text), portal()\n"));
    assert!(stub.contains("extern crate rustc_serialize;"));
    assert!(stub.contains("contracts(generic_text, tuple)"));

    assert!(descriptor.contains("# external dependencies:\n, lmdb, sqlite\n"));
    assert!(descriptor.contains("  buildInputs = [ lmdb sqlite ];\n"));
    assert_eq!(descriptor.matches("sqlite").count(), 2);

    assert!(manifest.ends_with("rustfbp = \"*\"\ncapnp = \"*\"\nrustc-serialize = \"0.3\"\n"));
    Ok(())
}

#[tokio::test]
async fn test_registry_without_markers_is_left_untouched() -> Result<()> {
    let root = TempDir::new()?;
    let original = "{ pkgs }:\n{\n  a = callPackage ./a {};\n}\n";
    std::fs::write(root.path().join("default.nix"), original)?;
    let spec = ComponentConfig::from_toml_str(NAND_SPEC)?.into_spec()?;

    let err = engine(&root).run(&spec).await.unwrap_err();

    assert!(matches!(err, ScaffoldError::RegistrySentinelMissing { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(std::fs::read_to_string(root.path().join("default.nix"))?, original);
    assert!(!root.path().join("maths").exists());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_lock_tool_keeps_component() -> Result<()> {
    let root = components_root()?;
    let spec = ComponentConfig::from_toml_str(NAND_SPEC)?.into_spec()?;
    let engine = ScaffoldEngine::new(
        LocalStorage::new(root.path()),
        CargoLockTool::new("false"),
        ScaffoldOptions::default(),
    );

    let report = engine.run(&spec).await?;

    match report.lockfile {
        LockfileStatus::Failed(e) => assert_eq!(e.exit_code(), 3),
        other => panic!("unexpected lockfile status: {other:?}"),
    }
    assert!(root.path().join("maths/boolean/nand/Cargo.toml").exists());
    Ok(())
}

/// Same location as `path`, spelled relative to the process working directory.
#[cfg(unix)]
fn relative_to_cwd(path: &std::path::Path) -> Result<std::path::PathBuf> {
    let cwd = std::env::current_dir()?;
    let mut relative = std::path::PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    Ok(relative.join(path.strip_prefix("/")?))
}

#[cfg(unix)]
#[tokio::test]
async fn test_lockfile_generated_with_relative_components_root() -> Result<()> {
    let root = components_root()?;
    let relative_root = relative_to_cwd(root.path())?;
    assert!(relative_root.is_relative());

    // `sh generate-lockfile --manifest-path <m>` runs this script from the
    // component directory in place of cargo.
    let component_dir = root.path().join("maths/boolean/nand");
    std::fs::create_dir_all(&component_dir)?;
    std::fs::write(
        component_dir.join("generate-lockfile"),
        "[ \"$1\" = --manifest-path ] && test -f \"$2\" && touch Cargo.lock\n",
    )?;

    let spec = ComponentConfig::from_toml_str(NAND_SPEC)?.into_spec()?;
    let engine = ScaffoldEngine::new(
        LocalStorage::new(relative_root),
        CargoLockTool::new("sh"),
        ScaffoldOptions::default(),
    );

    let report = engine.run(&spec).await?;

    assert!(
        matches!(report.lockfile, LockfileStatus::Generated),
        "lockfile status: {:?}",
        report.lockfile
    );
    assert!(component_dir.join("Cargo.lock").exists());
    assert!(std::fs::read_to_string(root.path().join("default.nix"))?
        .contains("  maths_boolean_nand = callPackage ./maths/boolean/nand {};\n"));
    Ok(())
}
