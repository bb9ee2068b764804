//! Git command execution

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a single git command
///
/// `args` excludes the program name. Output is captured, never streamed.
/// A non-zero exit is an [`Error::CommandFailed`]; there are no retries.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[&str]) -> Result<CommandOutput>;
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        (**self).run(args).await
    }
}

/// Command runner spawning the real git executable
#[derive(Debug, Clone)]
pub struct GitCommandRunner {
    program: String,
    cwd: Option<Utf8PathBuf>,
}

impl GitCommandRunner {
    /// Runner for the given git executable in the process's current directory
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cwd: None,
        }
    }

    /// Run commands inside `path`
    pub fn in_dir(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn cwd(&self) -> Option<&Utf8Path> {
        self.cwd.as_deref()
    }
}

impl Default for GitCommandRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl CommandRunner for GitCommandRunner {
    async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!("Running: {} {}", self.program, args.join(" "));

        let mut cmd = Command::new(&self.program);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.args(args);

        let output = cmd.output().await.map_err(|source| Error::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                "Command failed: {} {}\nStderr: {}",
                self.program,
                args.join(" "),
                stderr.trim()
            );
            let argv = std::iter::once(self.program.clone())
                .chain(args.iter().map(|a| a.to_string()))
                .collect();
            return Err(Error::command_failed(argv, output.status.code(), stderr));
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
