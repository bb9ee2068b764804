//! Runtime configuration types
//!
//! These types define the repository coordinates, registry file locations,
//! git workflow and validation settings the bot runs with.

use super::category::Category;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// GitHub repository settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Registry file locations
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Git workflow settings
    #[serde(default)]
    pub git: GitWorkflowConfig,

    /// Plugin validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// GitHub repository configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Base URL for GitHub API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Repository owner
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name
    #[serde(default = "default_repo")]
    pub repo: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            owner: default_owner(),
            repo: default_repo(),
        }
    }
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_owner() -> String {
    "nonebot".to_string()
}
fn default_repo() -> String {
    "nonebot2".to_string()
}

/// Registry file locations, one JSON array per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    #[serde(default = "default_adapter_path")]
    pub adapter_path: Utf8PathBuf,

    #[serde(default = "default_bot_path")]
    pub bot_path: Utf8PathBuf,

    #[serde(default = "default_plugin_path")]
    pub plugin_path: Utf8PathBuf,
}

impl RegistryConfig {
    /// Path of the registry file for a category
    pub fn path_for(&self, category: Category) -> &Utf8Path {
        match category {
            Category::Adapter => &self.adapter_path,
            Category::Bot => &self.bot_path,
            Category::Plugin => &self.plugin_path,
        }
    }

    /// Resolve relative paths against a working tree root
    pub fn rooted_at(&self, root: &Utf8Path) -> Self {
        Self {
            adapter_path: root.join(&self.adapter_path),
            bot_path: root.join(&self.bot_path),
            plugin_path: root.join(&self.plugin_path),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            adapter_path: default_adapter_path(),
            bot_path: default_bot_path(),
            plugin_path: default_plugin_path(),
        }
    }
}

fn default_adapter_path() -> Utf8PathBuf {
    Utf8PathBuf::from("assets/adapters.json")
}
fn default_bot_path() -> Utf8PathBuf {
    Utf8PathBuf::from("assets/bots.json")
}
fn default_plugin_path() -> Utf8PathBuf {
    Utf8PathBuf::from("assets/plugins.json")
}

/// Git workflow configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Git executable
    #[serde(default = "default_git_program")]
    pub program: String,

    /// Remote the publish branches live on
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Mainline branch publish branches are rebuilt from
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Domain of the committer's no-reply address
    #[serde(default = "default_noreply_domain")]
    pub noreply_domain: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            program: default_git_program(),
            remote: default_remote(),
            base_branch: default_base_branch(),
            noreply_domain: default_noreply_domain(),
        }
    }
}

fn default_git_program() -> String {
    "git".to_string()
}
fn default_remote() -> String {
    "origin".to_string()
}
fn default_base_branch() -> String {
    "master".to_string()
}
fn default_noreply_domain() -> String {
    "users.noreply.github.com".to_string()
}

/// Plugin validation run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValidationConfig {
    /// Docker executable
    #[serde(default = "default_docker_program")]
    pub docker_program: String,

    /// Test runner image, without tag
    #[serde(default = "default_image")]
    pub image: String,

    /// Python version selecting the image tag
    #[serde(default = "default_python_version")]
    pub python_version: String,
}

impl ValidationConfig {
    /// Full image reference including tag
    pub fn image_ref(&self) -> String {
        format!("{}:{}-latest", self.image, self.python_version)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            docker_program: default_docker_program(),
            image: default_image(),
            python_version: default_python_version(),
        }
    }
}

fn default_docker_program() -> String {
    "docker".to_string()
}
fn default_image() -> String {
    "ghcr.io/nonebot/nonetest".to_string()
}
fn default_python_version() -> String {
    "3.12".to_string()
}
