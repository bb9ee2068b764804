//! Error types for regbot-git

use thiserror::Error;

/// Result type alias using regbot-git's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Git command error types
#[derive(Error, Debug)]
pub enum Error {
    /// Command exited with a non-zero status
    #[error("Command `{}` failed ({}): {stderr}", .argv.join(" "), describe_exit(.exit_code))]
    CommandFailed {
        argv: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Command could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    /// Create a command failed error
    pub fn command_failed(
        argv: Vec<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            argv,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Exit code of a failed command, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            Self::Spawn { .. } => None,
        }
    }
}
