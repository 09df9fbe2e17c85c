use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// File access rooted at the components directory.
pub trait Storage: Send + Sync {
    /// Absolute location of `path`, for handing to external tools.
    fn resolve(&self, path: &Path) -> PathBuf;
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn create_dir_all(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct LockOutput {
    pub stdout: String,
    pub stderr: String,
}

/// External dependency-lock generator. A non-zero exit must surface as
/// `ScaffoldError::LockToolFailure`.
#[async_trait]
pub trait LockTool: Send + Sync {
    fn command(&self) -> &str;
    async fn generate_lockfile(&self, manifest_path: &Path, working_dir: &Path)
        -> Result<LockOutput>;
}
