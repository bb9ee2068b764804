//! # regbot-core
//!
//! Core library for regbot providing:
//! - Registry data model (categories, submissions, registry entries)
//! - Issue body parsing into submission records
//! - Registry JSON file loading and saving
//! - Runtime configuration with embedded defaults and env overrides

pub mod config;
pub mod error;
pub mod issue;
pub mod registry;
pub mod types;

pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use issue::parse_submission;
pub use registry::{JsonRegistryStore, RegistryFile, RegistryStore};
pub use types::{
    AdapterSubmission, BotSubmission, Category, PluginMetadata, PluginSubmission, RegistryEntry,
    RuntimeConfig, SubmissionRecord, Tag,
};
