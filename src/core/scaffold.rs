use crate::core::descriptor::generate_descriptor;
use crate::core::manifest::generate_manifest;
use crate::core::materializer::Materializer;
use crate::core::registry::{registry_entry, Registry};
use crate::core::stub::generate_stub;
use crate::domain::model::{ComponentSpec, GeneratedArtifacts};
use crate::domain::ports::{LockTool, Storage};
use crate::utils::error::{Result, ScaffoldError};
use std::path::PathBuf;

/// Renders every artifact in memory; nothing touches the filesystem.
pub fn generate_artifacts(spec: &ComponentSpec) -> Result<GeneratedArtifacts> {
    Ok(GeneratedArtifacts {
        manifest: generate_manifest(&spec.name, &spec.cargo_deps)?,
        descriptor: generate_descriptor(
            &spec.name,
            &spec.description,
            &spec.ports,
            &spec.external_deps,
        )?,
        stub: generate_stub(&spec.name, &spec.ports, &spec.cargo_deps, &spec.extra_ports)?,
        registry_entry: registry_entry(&spec.name),
    })
}

#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Registry location, relative to the storage root unless absolute.
    pub registry_path: PathBuf,
    pub dry_run: bool,
    pub skip_lockfile: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("default.nix"),
            dry_run: false,
            skip_lockfile: false,
        }
    }
}

#[derive(Debug)]
pub enum LockfileStatus {
    Generated,
    Skipped,
    Failed(ScaffoldError),
}

#[derive(Debug)]
pub struct ScaffoldReport {
    pub component: String,
    pub component_dir: PathBuf,
    pub artifacts: GeneratedArtifacts,
    pub lockfile: LockfileStatus,
    pub dry_run: bool,
}

pub struct ScaffoldEngine<S: Storage, L: LockTool> {
    storage: S,
    lock_tool: L,
    options: ScaffoldOptions,
}

impl<S: Storage, L: LockTool> ScaffoldEngine<S, L> {
    pub fn new(storage: S, lock_tool: L, options: ScaffoldOptions) -> Self {
        Self {
            storage,
            lock_tool,
            options,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Generates, checks, writes and registers one component.
    ///
    /// Every check that can abort the run (existing component, registry
    /// markers) happens before the first write. A lock tool failure does not
    /// abort: it is reported through `ScaffoldReport::lockfile`.
    pub async fn run(&self, spec: &ComponentSpec) -> Result<ScaffoldReport> {
        tracing::info!("Generating component {}", spec.name);
        let artifacts = generate_artifacts(spec)?;
        tracing::debug!(
            "Rendered {} ports into manifest, descriptor and stub",
            spec.ports.port_count()
        );

        let materializer = Materializer::new(&self.storage);
        materializer.ensure_absent(&spec.name).await?;

        let registry_path = &self.options.registry_path;
        let content = self.storage.read_file(registry_path).await?;
        let mut registry = Registry::parse(&content, &self.storage.resolve(registry_path))?;
        let ident = spec.name.ident();
        if registry.contains(&ident) {
            tracing::warn!("Registry already binds {}; adding another entry", ident);
        }

        let component_dir = Materializer::<S>::component_dir(&spec.name);

        if self.options.dry_run {
            tracing::info!("Dry run: nothing written");
            return Ok(ScaffoldReport {
                component: ident,
                component_dir,
                artifacts,
                lockfile: LockfileStatus::Skipped,
                dry_run: true,
            });
        }

        let written = materializer.materialize(&spec.name, &artifacts).await?;
        tracing::info!("Wrote component files to {}", self.storage.resolve(&written.dir).display());

        registry.insert(artifacts.registry_entry.clone());
        self.storage
            .write_file(registry_path, &registry.render())
            .await?;
        tracing::info!("Registered {} in {}", ident, registry_path.display());

        let lockfile = if self.options.skip_lockfile {
            LockfileStatus::Skipped
        } else {
            self.generate_lockfile(&written.manifest, &written.dir).await
        };

        Ok(ScaffoldReport {
            component: ident,
            component_dir,
            artifacts,
            lockfile,
            dry_run: false,
        })
    }

    async fn generate_lockfile(&self, manifest: &std::path::Path, dir: &std::path::Path) -> LockfileStatus {
        let manifest = self.storage.resolve(manifest);
        let dir = self.storage.resolve(dir);

        match self.lock_tool.generate_lockfile(&manifest, &dir).await {
            Ok(output) => {
                for stream in [&output.stdout, &output.stderr] {
                    if !stream.trim().is_empty() {
                        tracing::debug!("{}: {}", self.lock_tool.command(), stream.trim());
                    }
                }
                tracing::info!("Generated lockfile for {}", manifest.display());
                LockfileStatus::Generated
            }
            Err(e) => {
                tracing::warn!("Lockfile generation failed: {}", e);
                LockfileStatus::Failed(e)
            }
        }
    }
}
