//! Layered configuration loader
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file (`--config` path, or regbot.yaml found from the current directory upwards)
//! 3. Environment variables (REGBOT_* prefix)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["regbot.yaml", "regbot.yml"];

const DEFAULTS_FILE: &str = "regbot-defaults.yaml";

/// Runtime configuration loader
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Explicit config file; when unset the loader searches for one
    config_path: Option<Utf8PathBuf>,
    /// Directory the search starts from; defaults to the current directory
    search_dir: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit config file, which must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            search_dir: None,
        }
    }

    /// Search for a config file starting from `dir`
    pub fn with_search_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_path: None,
            search_dir: Some(dir.into()),
        }
    }

    /// Load the runtime configuration with layered precedence
    pub fn load(&self) -> Result<RuntimeConfig> {
        let mut merged = Self::load_embedded_defaults()?;

        if let Some(path) = self.locate_config_file()? {
            debug!("Loading config file: {}", path);
            let content = fs::read_to_string(&path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(path.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            let overlay: Value = serde_yaml_ng::from_str(&content)
                .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
            merge_values(&mut merged, overlay);
        }

        let config: RuntimeConfig = serde_yaml_ng::from_value(merged)?;
        Self::apply_env_overrides(config)
    }

    fn load_embedded_defaults() -> Result<Value> {
        let embedded = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    /// Explicit path, or the first config file found walking up from the search dir
    fn locate_config_file(&self) -> Result<Option<Utf8PathBuf>> {
        if let Some(path) = &self.config_path {
            return Ok(Some(path.clone()));
        }

        let start = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => {
                let cwd = env::current_dir()?;
                Utf8PathBuf::try_from(cwd).map_err(|_| {
                    Error::invalid_config("Current directory path is not valid UTF-8")
                })?
            }
        };

        let mut current: Option<&Utf8Path> = Some(start.as_path());
        while let Some(dir) = current {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(Some(candidate));
                }
            }
            current = dir.parent();
        }

        debug!("No config file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        // GitHub configuration
        if let Ok(val) = env::var("REGBOT_GITHUB_API_URL") {
            config.github.api_url = val;
        }
        if let Ok(val) = env::var("REGBOT_GITHUB_OWNER") {
            config.github.owner = val;
        }
        if let Ok(val) = env::var("REGBOT_GITHUB_REPO") {
            config.github.repo = val;
        }

        // Registry paths
        if let Ok(val) = env::var("REGBOT_ADAPTER_PATH") {
            config.registry.adapter_path = Utf8PathBuf::from(val);
        }
        if let Ok(val) = env::var("REGBOT_BOT_PATH") {
            config.registry.bot_path = Utf8PathBuf::from(val);
        }
        if let Ok(val) = env::var("REGBOT_PLUGIN_PATH") {
            config.registry.plugin_path = Utf8PathBuf::from(val);
        }

        // Git workflow
        if let Ok(val) = env::var("REGBOT_GIT_BASE_BRANCH") {
            config.git.base_branch = val;
        }
        if let Ok(val) = env::var("REGBOT_GIT_REMOTE") {
            config.git.remote = val;
        }

        // Validation
        if let Ok(val) = env::var("REGBOT_VALIDATION_IMAGE") {
            config.validation.image = val;
        }
        if let Ok(val) = env::var("REGBOT_PYTHON_VERSION") {
            if val.trim().is_empty() {
                return Err(Error::invalid_config(
                    "REGBOT_PYTHON_VERSION must not be empty",
                ));
            }
            config.validation.python_version = val;
        }

        Ok(config)
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}
