pub mod contracts;
pub mod dependencies;
pub mod descriptor;
pub mod lockfile;
pub mod manifest;
pub mod materializer;
pub mod registry;
pub mod scaffold;
pub mod stub;
pub mod template;

pub use crate::domain::model::{ComponentSpec, GeneratedArtifacts};
pub use crate::domain::ports::{LockTool, Storage};
pub use crate::utils::error::Result;
