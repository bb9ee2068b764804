//! # regbot-validation
//!
//! Runs a submitted plugin through the external sandboxed test image and
//! unpacks the metadata it reports. Retries, timeouts and the sandbox itself
//! are the runner image's business; a failed run is surfaced as-is.

mod docker;
mod error;
mod types;

pub use docker::DockerPluginTest;
pub use error::{Error, Result};
pub use types::{TestReport, ValidationOutcome, ValidationRunner};
