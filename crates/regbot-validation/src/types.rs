//! Validation runner interface and report types

use crate::error::Result;
use async_trait::async_trait;
use regbot_core::types::{PluginMetadata, PluginSubmission};
use serde::{Deserialize, Serialize};

/// Report printed by the test image as JSON on stdout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Metadata extracted from the loaded plugin, if it could be loaded
    #[serde(default)]
    pub metadata: Option<PluginMetadata>,
    /// Whether the plugin imported successfully
    #[serde(default)]
    pub load: bool,
    /// Whether the plugin started inside a bot
    #[serde(default)]
    pub run: bool,
    /// Captured runner output
    #[serde(default)]
    pub output: String,
}

/// Result of validating one plugin submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub metadata: Option<PluginMetadata>,
    pub passed: bool,
    pub output: String,
}

impl From<TestReport> for ValidationOutcome {
    fn from(report: TestReport) -> Self {
        Self {
            passed: report.load && report.run,
            metadata: report.metadata,
            output: report.output,
        }
    }
}

/// Runs a plugin submission through the sandboxed test
#[async_trait]
pub trait ValidationRunner: Send + Sync {
    async fn run(&self, submission: &PluginSubmission) -> Result<ValidationOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_requires_load_and_run() {
        let report = TestReport {
            metadata: None,
            load: true,
            run: false,
            output: String::new(),
        };
        assert!(!ValidationOutcome::from(report).passed);
    }

    #[test]
    fn test_report_defaults() {
        let report: TestReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.metadata, None);
        assert!(!report.load);
    }
}
