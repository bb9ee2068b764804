//! Registry categories

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registry category a submission belongs to
///
/// Each category has its own registry file, issue schema and commit
/// message wording. The category of a pull request is taken from its
/// labels, see [`Category::from_labels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Protocol adapter
    Adapter,
    /// Bot project
    Bot,
    /// Plugin package
    Plugin,
}

impl Category {
    /// Get all categories
    pub fn all() -> [Self; 3] {
        [Self::Adapter, Self::Bot, Self::Plugin]
    }

    /// Lowercase name used in commit messages and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adapter => "adapter",
            Self::Bot => "bot",
            Self::Plugin => "plugin",
        }
    }

    /// Name of the pull request label marking this category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Adapter => "Adapter",
            Self::Bot => "Bot",
            Self::Plugin => "Plugin",
        }
    }

    /// Match a single label name against the category labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.label() == label)
    }

    /// Determine the category from a pull request's label set
    ///
    /// Labels that are not category labels are ignored. The first category
    /// label wins.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .find_map(|label| Self::from_label(label.as_ref()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "adapter" => Ok(Self::Adapter),
            "bot" => Ok(Self::Bot),
            "plugin" => Ok(Self::Plugin),
            _ => Err(Error::unknown_category(s)),
        }
    }
}
