//! Error types for regbot-publish

use thiserror::Error;

/// Result type alias using regbot-publish's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the resolution of a single candidate
#[derive(Error, Debug)]
pub enum Error {
    /// Issue parsing or registry file error
    #[error(transparent)]
    Core(#[from] regbot_core::Error),

    /// A git command failed
    #[error(transparent)]
    Git(#[from] regbot_git::Error),

    /// Issue tracker request failed
    #[error(transparent)]
    GitHub(#[from] regbot_github::Error),

    /// The validation run could not be completed
    #[error(transparent)]
    Validation(#[from] regbot_validation::Error),

    /// The plugin did not pass validation and no maintainer hint overrides it
    #[error("Plugin {project_link} failed validation: {reason}")]
    ValidationFailed {
        project_link: String,
        reason: String,
    },
}

impl Error {
    /// Create a validation failed error
    pub fn validation_failed(project_link: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            project_link: project_link.into(),
            reason: reason.into(),
        }
    }

    /// Exit code of the failed git command, if this is a command failure
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Git(e) => e.exit_code(),
            _ => None,
        }
    }
}
