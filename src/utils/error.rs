use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Malformed component specification ({field}): {message}")]
    SpecMalformed { field: String, message: String },

    #[error("Component already exists: {}", path.display())]
    ComponentAlreadyExists { path: PathBuf },

    #[error("Registry {} is missing the sentinel line: {marker}", path.display())]
    RegistrySentinelMissing { path: PathBuf, marker: String },

    #[error("Lock tool `{command}` failed: {message}")]
    LockToolFailure { command: String, message: String },

    #[error("Filesystem error at {}: {source}", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {message}")]
    TemplateError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Specification,
    Filesystem,
    Registry,
    LockTool,
    Internal,
}

impl ScaffoldError {
    pub fn spec(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SpecMalformed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SpecMalformed { .. } => ErrorCategory::Specification,
            Self::ComponentAlreadyExists { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Filesystem
            }
            Self::RegistrySentinelMissing { .. } => ErrorCategory::Registry,
            Self::LockToolFailure { .. } => ErrorCategory::LockTool,
            Self::TemplateError { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ComponentAlreadyExists { .. } => 1,
            Self::SpecMalformed { .. } => 2,
            Self::LockToolFailure { .. } => 3,
            Self::RegistrySentinelMissing { .. } => 4,
            Self::FilesystemError { .. } | Self::TemplateError { .. } => 5,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SpecMalformed { field, message } => {
                format!("Component specification is invalid at `{}`: {}", field, message)
            }
            Self::ComponentAlreadyExists { .. } => {
                "*** Aborted: component already exists. ***".to_string()
            }
            Self::RegistrySentinelMissing { path, .. } => format!(
                "Component registry {} has no insertion markers; it was left untouched",
                path.display()
            ),
            Self::LockToolFailure { command, message } => {
                format!("Lockfile generation with `{}` failed: {}", command, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Specification => {
                "Check component.toml: name, description and the [ports] tables are required"
            }
            ErrorCategory::Filesystem => match self {
                Self::ComponentAlreadyExists { .. } => {
                    "Pick another component name or remove the existing component directory"
                }
                _ => "Check that the components root exists and is writable",
            },
            ErrorCategory::Registry => {
                "Restore the `self = rec {` and `};` insertion marker lines in the registry"
            }
            ErrorCategory::LockTool => {
                "The component files were written; run `cargo generate-lockfile` in the component directory by hand"
            }
            ErrorCategory::Internal => "This is a bug in the generator templates",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
