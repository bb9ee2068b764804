//! Submission records parsed from publish issues

use super::category::Category;
use serde::{Deserialize, Serialize};

/// Registry tag shown next to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag text
    pub label: String,
    /// Hex color, e.g. "#ffffff"
    pub color: String,
}

impl Tag {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Adapter submission fields taken from the issue body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSubmission {
    pub module_name: String,
    pub project_link: String,
    pub name: String,
    pub desc: String,
    pub homepage: String,
    pub tags: Vec<Tag>,
}

/// Bot submission fields taken from the issue body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSubmission {
    pub name: String,
    pub desc: String,
    pub homepage: String,
    pub tags: Vec<Tag>,
}

/// Plugin submission fields taken from the issue body
///
/// Name, description, homepage, type and supported adapters are not part of
/// the issue; they come from the validation run's [`PluginMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSubmission {
    pub module_name: String,
    pub project_link: String,
    pub tags: Vec<Tag>,
    /// Dotenv-style configuration passed to the validation run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

/// Metadata reported by a plugin validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub desc: String,
    pub homepage: String,
    #[serde(rename = "type")]
    pub plugin_type: Option<String>,
    pub supported_adapters: Option<Vec<String>>,
}

/// A submission parsed from a publish issue, tagged by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum SubmissionRecord {
    Adapter(AdapterSubmission),
    Bot(BotSubmission),
    Plugin(PluginSubmission),
}

impl SubmissionRecord {
    /// Category of this submission
    pub fn category(&self) -> Category {
        match self {
            Self::Adapter(_) => Category::Adapter,
            Self::Bot(_) => Category::Bot,
            Self::Plugin(_) => Category::Plugin,
        }
    }

    /// Build the registry entry for this submission
    ///
    /// Plugins need the validation metadata; for the other categories
    /// `metadata` is ignored. Returns `None` for a plugin without metadata.
    pub fn into_entry(
        self,
        author_id: u64,
        metadata: Option<PluginMetadata>,
    ) -> Option<RegistryEntry> {
        let entry = match self {
            Self::Adapter(a) => RegistryEntry::Adapter(AdapterEntry {
                module_name: a.module_name,
                project_link: a.project_link,
                name: a.name,
                desc: a.desc,
                author_id,
                homepage: a.homepage,
                tags: a.tags,
                is_official: false,
            }),
            Self::Bot(b) => RegistryEntry::Bot(BotEntry {
                name: b.name,
                desc: b.desc,
                author_id,
                homepage: b.homepage,
                tags: b.tags,
                is_official: false,
            }),
            Self::Plugin(p) => {
                let metadata = metadata?;
                RegistryEntry::Plugin(PluginEntry {
                    module_name: p.module_name,
                    project_link: p.project_link,
                    name: metadata.name,
                    desc: metadata.desc,
                    author_id,
                    homepage: metadata.homepage,
                    tags: p.tags,
                    is_official: false,
                    plugin_type: metadata.plugin_type,
                    supported_adapters: metadata.supported_adapters,
                })
            }
        };
        Some(entry)
    }
}

/// Persisted adapter entry in `adapters.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterEntry {
    pub module_name: String,
    pub project_link: String,
    pub name: String,
    pub desc: String,
    pub author_id: u64,
    pub homepage: String,
    pub tags: Vec<Tag>,
    pub is_official: bool,
}

/// Persisted bot entry in `bots.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotEntry {
    pub name: String,
    pub desc: String,
    pub author_id: u64,
    pub homepage: String,
    pub tags: Vec<Tag>,
    pub is_official: bool,
}

/// Persisted plugin entry in `plugins.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub module_name: String,
    pub project_link: String,
    pub name: String,
    pub desc: String,
    pub author_id: u64,
    pub homepage: String,
    pub tags: Vec<Tag>,
    pub is_official: bool,
    #[serde(rename = "type")]
    pub plugin_type: Option<String>,
    pub supported_adapters: Option<Vec<String>>,
}

/// Registry entry ready to be appended to its category's file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RegistryEntry {
    Adapter(AdapterEntry),
    Bot(BotEntry),
    Plugin(PluginEntry),
}

impl RegistryEntry {
    pub fn category(&self) -> Category {
        match self {
            Self::Adapter(_) => Category::Adapter,
            Self::Bot(_) => Category::Bot,
            Self::Plugin(_) => Category::Plugin,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Adapter(a) => &a.name,
            Self::Bot(b) => &b.name,
            Self::Plugin(p) => &p.name,
        }
    }
}
