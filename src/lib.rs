pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, component_config::ComponentConfig};
pub use crate::core::lockfile::CargoLockTool;
pub use crate::core::scaffold::{
    generate_artifacts, LockfileStatus, ScaffoldEngine, ScaffoldOptions, ScaffoldReport,
};
pub use domain::model::{ComponentName, ComponentSpec, ExtraPorts, GeneratedArtifacts, PortGroups};
pub use utils::error::{Result, ScaffoldError};
