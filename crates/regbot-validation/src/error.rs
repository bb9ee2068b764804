//! Error types for regbot-validation

use thiserror::Error;

/// Result type alias using regbot-validation's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Validation run error types
#[derive(Error, Debug)]
pub enum Error {
    /// The runner exited unsuccessfully
    #[error("Validation run for {project_link} failed: {message}")]
    RunnerFailed {
        project_link: String,
        message: String,
    },

    /// The runner produced output that is not a test report
    #[error("Invalid validation output for {project_link}: {source}")]
    InvalidOutput {
        project_link: String,
        #[source]
        source: serde_json::Error,
    },

    /// The runner could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a runner failed error
    pub fn runner_failed(project_link: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RunnerFailed {
            project_link: project_link.into(),
            message: message.into(),
        }
    }
}
