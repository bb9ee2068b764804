//! Publish issue body parsing
//!
//! Publish issues are created from an issue-form template, so every field is
//! rendered as a level-3 Markdown heading followed by the submitted value:
//!
//! ```text
//! ### 名称
//!
//! name
//!
//! ### 标签
//!
//! [{"label": "test", "color": "#ffffff"}]
//! ```
//!
//! A section's value runs until the next `##`/`###` heading or the end of the
//! body. Sections that are not part of a category's schema are ignored.

use crate::error::{Error, Result};
use crate::types::{
    AdapterSubmission, BotSubmission, Category, PluginSubmission, SubmissionRecord, Tag,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{2,3}\s+(.+?)\s*$").expect("heading regex is valid"));

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*\n(.*?)\n?```$").expect("fence regex is valid")
});

/// Placeholder GitHub renders for an empty optional form field
const NO_RESPONSE: &str = "_No response_";

/// Issue-form fields and the headings they are rendered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Desc,
    ProjectLink,
    ModuleName,
    Homepage,
    Tags,
    PluginConfig,
}

impl Field {
    /// Heading text in the issue-form template
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Name => "名称",
            Self::Desc => "描述",
            Self::ProjectLink => "PyPI 项目名",
            Self::ModuleName => "导入包名",
            Self::Homepage => "项目仓库/主页链接",
            Self::Tags => "标签",
            Self::PluginConfig => "插件配置项",
        }
    }

    /// Field name as it appears in registry entries and error messages
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Desc => "desc",
            Self::ProjectLink => "project_link",
            Self::ModuleName => "module_name",
            Self::Homepage => "homepage",
            Self::Tags => "tags",
            Self::PluginConfig => "plugin_config",
        }
    }

    /// Required fields for a category, in issue-form order
    pub fn required_for(category: Category) -> &'static [Field] {
        match category {
            Category::Adapter => &[
                Self::Name,
                Self::Desc,
                Self::ProjectLink,
                Self::ModuleName,
                Self::Homepage,
            ],
            Category::Bot => &[Self::Name, Self::Desc, Self::Homepage],
            Category::Plugin => &[Self::ProjectLink, Self::ModuleName],
        }
    }
}

/// Split an issue body into `heading -> value` sections
fn split_sections(body: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some((heading, lines)) = current.take() {
                sections.insert(heading, lines.join("\n"));
            }
            current = Some((caps[1].to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some((heading, lines)) = current {
        sections.insert(heading, lines.join("\n"));
    }

    sections
}

/// Strip surrounding code fences from a value
fn strip_fence(value: &str) -> &str {
    FENCE_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(value)
}

struct Sections(HashMap<String, String>);

impl Sections {
    fn get(&self, field: Field) -> Option<&str> {
        self.0
            .get(field.heading())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && *v != NO_RESPONSE)
    }

    fn owned(&self, field: Field) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        match self.get(Field::Tags) {
            Some(raw) => serde_json::from_str(strip_fence(raw))
                .map_err(|e| Error::invalid_tags(e.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

/// Parse a publish issue body into a submission record
///
/// Fails with [`Error::MalformedSubmission`] listing every required field
/// of the category that is absent from the body.
pub fn parse_submission(category: Category, body: &str) -> Result<SubmissionRecord> {
    let sections = Sections(split_sections(body));

    let missing: Vec<&'static str> = Field::required_for(category)
        .iter()
        .filter(|field| sections.get(**field).is_none())
        .map(|field| field.key())
        .collect();
    if !missing.is_empty() {
        return Err(Error::malformed_submission(category, missing));
    }

    let tags = sections.tags()?;
    debug!("Parsed {} submission with {} tag(s)", category, tags.len());

    let record = match category {
        Category::Adapter => SubmissionRecord::Adapter(AdapterSubmission {
            module_name: sections.owned(Field::ModuleName),
            project_link: sections.owned(Field::ProjectLink),
            name: sections.owned(Field::Name),
            desc: sections.owned(Field::Desc),
            homepage: sections.owned(Field::Homepage),
            tags,
        }),
        Category::Bot => SubmissionRecord::Bot(BotSubmission {
            name: sections.owned(Field::Name),
            desc: sections.owned(Field::Desc),
            homepage: sections.owned(Field::Homepage),
            tags,
        }),
        Category::Plugin => SubmissionRecord::Plugin(PluginSubmission {
            module_name: sections.owned(Field::ModuleName),
            project_link: sections.owned(Field::ProjectLink),
            tags,
            config: sections
                .get(Field::PluginConfig)
                .map(|raw| strip_fence(raw).to_string()),
        }),
    };

    Ok(record)
}
