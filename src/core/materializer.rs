use crate::domain::model::{ComponentName, GeneratedArtifacts};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

pub const DESCRIPTOR_FILE: &str = "default.nix";
pub const MANIFEST_FILE: &str = "Cargo.toml";
pub const SOURCE_DIR: &str = "src";
pub const STUB_FILE: &str = "lib.rs";

/// Paths of a written component, relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedComponent {
    pub dir: PathBuf,
    pub descriptor: PathBuf,
    pub manifest: PathBuf,
    pub stub: PathBuf,
}

impl MaterializedComponent {
    fn for_dir(dir: PathBuf) -> Self {
        Self {
            descriptor: dir.join(DESCRIPTOR_FILE),
            manifest: dir.join(MANIFEST_FILE),
            stub: dir.join(SOURCE_DIR).join(STUB_FILE),
            dir,
        }
    }
}

pub struct Materializer<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> Materializer<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn component_dir(name: &ComponentName) -> PathBuf {
        name.relative_path()
    }

    /// Fails with `ComponentAlreadyExists` when the directory already holds a descriptor.
    pub async fn ensure_absent(&self, name: &ComponentName) -> Result<()> {
        let descriptor = Self::component_dir(name).join(DESCRIPTOR_FILE);
        if self.storage.exists(&descriptor).await? {
            return Err(ScaffoldError::ComponentAlreadyExists {
                path: self.storage.resolve(&Self::component_dir(name)),
            });
        }
        Ok(())
    }

    pub async fn materialize(
        &self,
        name: &ComponentName,
        artifacts: &GeneratedArtifacts,
    ) -> Result<MaterializedComponent> {
        self.ensure_absent(name).await?;

        let written = MaterializedComponent::for_dir(Self::component_dir(name));
        self.storage
            .create_dir_all(&written.dir.join(SOURCE_DIR))
            .await?;

        self.write(&written.descriptor, &artifacts.descriptor).await?;
        self.write(&written.manifest, &artifacts.manifest).await?;
        self.write(&written.stub, &artifacts.stub).await?;

        Ok(written)
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        tracing::debug!("Writing {}", path.display());
        self.storage.write_file(path, contents).await
    }
}
