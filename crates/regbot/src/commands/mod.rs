//! CLI command implementations

pub mod config;
pub mod parse_issue;
pub mod resolve;

use anyhow::{Context, Result};
use camino::Utf8Path;
use regbot_core::{ConfigLoader, RuntimeConfig};

/// Load the runtime configuration, from `path` when given
pub fn load_config(path: Option<&Utf8Path>) -> Result<RuntimeConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::with_file(path.to_path_buf()),
        None => ConfigLoader::new(),
    };
    loader.load().context("Failed to load configuration")
}
