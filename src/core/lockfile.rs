use crate::domain::ports::{LockOutput, LockTool};
use crate::utils::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Runs `<program> generate-lockfile --manifest-path <manifest>` in the component directory.
#[derive(Debug, Clone)]
pub struct CargoLockTool {
    program: String,
}

impl CargoLockTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn failure(&self, message: impl Into<String>) -> ScaffoldError {
        ScaffoldError::LockToolFailure {
            command: self.program.clone(),
            message: message.into(),
        }
    }
}

impl Default for CargoLockTool {
    fn default() -> Self {
        Self::new("cargo")
    }
}

#[async_trait]
impl LockTool for CargoLockTool {
    fn command(&self) -> &str {
        &self.program
    }

    async fn generate_lockfile(
        &self,
        manifest_path: &Path,
        working_dir: &Path,
    ) -> Result<LockOutput> {
        // The child runs inside `working_dir`, so a manifest below it is passed relative to it.
        let manifest_arg = manifest_path
            .strip_prefix(working_dir)
            .unwrap_or(manifest_path);
        tracing::debug!(
            "Running {} generate-lockfile --manifest-path {} in {}",
            self.program,
            manifest_arg.display(),
            working_dir.display()
        );

        let output = Command::new(&self.program)
            .arg("generate-lockfile")
            .arg("--manifest-path")
            .arg(manifest_arg)
            .current_dir(working_dir)
            .output()
            .await
            .map_err(|e| self.failure(format!("could not start: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let detail = stderr.trim();
            return Err(self.failure(if detail.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, detail)
            }));
        }

        Ok(LockOutput { stdout, stderr })
    }
}
