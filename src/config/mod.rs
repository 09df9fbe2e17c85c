pub mod cli;
pub mod component_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "new-component")]
#[command(about = "Scaffold a new flow-based programming component and register it")]
pub struct CliConfig {
    /// Path to the component specification
    #[arg(short, long, default_value = "component.toml")]
    pub config: PathBuf,

    /// Directory holding all components and the registry
    #[arg(long, default_value = "../components")]
    pub components_root: PathBuf,

    /// Registry file, relative to the components root unless absolute
    #[arg(long, default_value = "default.nix")]
    pub registry: PathBuf,

    /// Program used to generate the component's lockfile
    #[arg(long, default_value = "cargo")]
    pub lock_command: String,

    /// Do not run the lockfile generator
    #[arg(long)]
    pub skip_lockfile: bool,

    /// Render and check everything, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn scaffold_options(&self) -> crate::core::scaffold::ScaffoldOptions {
        crate::core::scaffold::ScaffoldOptions {
            registry_path: self.registry.clone(),
            dry_run: self.dry_run,
            skip_lockfile: self.skip_lockfile,
        }
    }
}
