//! Registry file storage
//!
//! Each category is persisted as a JSON array in its own file. Existing
//! entries are kept as raw JSON objects so a rewrite never drops unknown
//! keys or reorders anything; new entries are only ever appended.

use crate::error::{Error, Result};
use crate::types::{Category, RegistryConfig, RegistryEntry};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fs;
use tracing::{debug, info};

/// In-memory copy of one category's registry file
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryFile {
    category: Category,
    path: Utf8PathBuf,
    entries: Vec<Value>,
}

impl RegistryFile {
    pub fn new(category: Category, path: impl Into<Utf8PathBuf>, entries: Vec<Value>) -> Self {
        Self {
            category,
            path: path.into(),
            entries,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry after all existing ones
    pub fn append(&mut self, entry: &RegistryEntry) -> Result<()> {
        debug_assert_eq!(entry.category(), self.category);
        self.entries.push(serde_json::to_value(entry)?);
        Ok(())
    }

    /// Render the file contents: two-space pretty JSON, non-ASCII kept literal
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }
}

/// Read-modify-write access to registry files
///
/// There is no locking; callers process one file at a time inside a
/// working tree they own exclusively.
pub trait RegistryStore {
    /// Load the registry file for a category
    fn load(&self, category: Category) -> Result<RegistryFile>;

    /// Persist a registry file
    fn save(&self, file: &RegistryFile) -> Result<()>;
}

/// Registry store backed by JSON files on disk
#[derive(Debug, Clone)]
pub struct JsonRegistryStore {
    paths: RegistryConfig,
}

impl JsonRegistryStore {
    pub fn new(paths: RegistryConfig) -> Self {
        Self { paths }
    }

    /// Store whose relative paths resolve against `root`
    pub fn rooted_at(paths: &RegistryConfig, root: &Utf8Path) -> Self {
        Self::new(paths.rooted_at(root))
    }

    pub fn path_for(&self, category: Category) -> &Utf8Path {
        self.paths.path_for(category)
    }
}

impl RegistryStore for JsonRegistryStore {
    fn load(&self, category: Category) -> Result<RegistryFile> {
        let path = self.path_for(category);
        debug!("Loading {} registry from {}", category, path);

        let content = fs::read_to_string(path)?;
        let entries = match serde_json::from_str::<Value>(&content)? {
            Value::Array(entries) => entries,
            _ => return Err(Error::invalid_registry(path.as_str())),
        };

        Ok(RegistryFile::new(category, path, entries))
    }

    fn save(&self, file: &RegistryFile) -> Result<()> {
        fs::write(file.path(), file.to_json_string()?)?;
        info!(
            "Wrote {} {} entries to {}",
            file.len(),
            file.category(),
            file.path()
        );
        Ok(())
    }
}
