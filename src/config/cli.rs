use crate::core::Storage;
use crate::utils::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Local filesystem rooted at the components directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

}

impl Storage for LocalStorage {
    /// Anchored to the process working directory when the root is relative.
    fn resolve(&self, path: &Path) -> PathBuf {
        let joined = self.base_path.join(path);
        std::path::absolute(&joined).unwrap_or(joined)
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let full_path = self.resolve(path);
        tokio::fs::try_exists(&full_path)
            .await
            .map_err(|e| ScaffoldError::filesystem(full_path, e))
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| ScaffoldError::filesystem(full_path, e))
    }

    async fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::filesystem(parent, e))?;
        }

        tokio::fs::write(&full_path, contents)
            .await
            .map_err(|e| ScaffoldError::filesystem(full_path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(|e| ScaffoldError::filesystem(full_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let path = Path::new("a/b/file.txt");

        assert!(!storage.exists(path).await.unwrap());
        storage.write_file(path, "contents").await.unwrap();
        assert!(storage.exists(path).await.unwrap());
        assert_eq!(storage.read_file(path).await.unwrap(), "contents");
    }

    #[test]
    fn test_relative_root_resolves_to_absolute_path() {
        let storage = LocalStorage::new("../components");
        let resolved = storage.resolve(Path::new("maths/boolean/nand/Cargo.toml"));

        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("components/maths/boolean/nand/Cargo.toml"));
    }

    #[tokio::test]
    async fn test_read_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file(Path::new("default.nix")).await.unwrap_err();
        assert!(err.to_string().contains("default.nix"));
        assert_eq!(err.exit_code(), 5);
    }
}
