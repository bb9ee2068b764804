//! Error types for regbot-core

use crate::types::Category;
use thiserror::Error;

/// Result type alias using regbot-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for regbot
#[derive(Error, Debug)]
pub enum Error {
    /// Issue body is missing required sections
    #[error("Malformed {category} submission: missing {}", .missing.join(", "))]
    MalformedSubmission {
        category: Category,
        missing: Vec<&'static str>,
    },

    /// Tags section is not a JSON array of {label, color}
    #[error("Invalid tags: {message}")]
    InvalidTags { message: String },

    /// Unknown category name
    #[error("Unknown category: {name}. Valid categories: adapter, bot, plugin")]
    UnknownCategory { name: String },

    /// Registry file is not a JSON array
    #[error("Registry file {path} is not a JSON array")]
    InvalidRegistry { path: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed submission error
    pub fn malformed_submission(category: Category, missing: Vec<&'static str>) -> Self {
        Self::MalformedSubmission { category, missing }
    }

    /// Create an invalid tags error
    pub fn invalid_tags(message: impl Into<String>) -> Self {
        Self::InvalidTags {
            message: message.into(),
        }
    }

    /// Create an unknown category error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory { name: name.into() }
    }

    /// Create an invalid registry error
    pub fn invalid_registry(path: impl Into<String>) -> Self {
        Self::InvalidRegistry { path: path.into() }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
