//! Docker-backed plugin test

use crate::error::{Error, Result};
use crate::types::{TestReport, ValidationOutcome, ValidationRunner};
use async_trait::async_trait;
use regbot_core::types::{PluginSubmission, ValidationConfig};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Runs the plugin test image with `docker run`
///
/// The submission is handed to the container through `PROJECT_LINK`,
/// `MODULE_NAME` and `PLUGIN_CONFIG`; the container prints a
/// [`TestReport`] as JSON on stdout, possibly after its own log lines.
#[derive(Debug, Clone)]
pub struct DockerPluginTest {
    program: String,
    image: String,
}

impl DockerPluginTest {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            program: config.docker_program.clone(),
            image: config.image_ref(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Arguments passed to docker for a submission
    pub fn docker_args(&self, submission: &PluginSubmission) -> Vec<String> {
        vec![
            "run".to_string(),
            "--rm".to_string(),
            "-e".to_string(),
            format!("PROJECT_LINK={}", submission.project_link),
            "-e".to_string(),
            format!("MODULE_NAME={}", submission.module_name),
            "-e".to_string(),
            format!(
                "PLUGIN_CONFIG={}",
                submission.config.as_deref().unwrap_or_default()
            ),
            self.image.clone(),
        ]
    }

    /// Parse the report from the container's stdout
    ///
    /// The whole output is tried first; when the report is preceded by log
    /// lines, the last non-empty line is parsed instead.
    pub fn parse_report(project_link: &str, stdout: &str) -> Result<TestReport> {
        let trimmed = stdout.trim();
        if let Ok(report) = serde_json::from_str(trimmed) {
            return Ok(report);
        }

        let line = trimmed
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();

        serde_json::from_str(line).map_err(|source| Error::InvalidOutput {
            project_link: project_link.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ValidationRunner for DockerPluginTest {
    async fn run(&self, submission: &PluginSubmission) -> Result<ValidationOutcome> {
        info!(
            "Testing plugin {} ({}) in {}",
            submission.project_link, submission.module_name, self.image
        );

        let args = self.docker_args(submission);
        debug!("Running: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::runner_failed(
                &submission.project_link,
                stderr.trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = Self::parse_report(&submission.project_link, &stdout)?;
        let outcome = ValidationOutcome::from(report);

        if outcome.passed {
            info!("Plugin {} passed validation", submission.project_link);
        } else {
            warn!(
                "Plugin {} did not pass validation:\n{}",
                submission.project_link, outcome.output
            );
        }

        Ok(outcome)
    }
}
