//! Common test helpers for regbot-publish integration tests
//!
//! Provides recording mocks for every collaborator of the resolver:
//! - `CommandLog` records git invocations instead of running them
//! - `MockTracker` serves issues and comments from memory
//! - `MockValidator` returns a canned validation outcome
//! - `RegistryFixture` lays out registry files in a temp directory

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use regbot_core::types::{GitWorkflowConfig, PluginMetadata, PluginSubmission, RegistryConfig};
use regbot_core::JsonRegistryStore;
use regbot_git::{CommandOutput, CommandRunner, WorkingTree};
use regbot_github::{Comment, Issue, IssueTracker, PullRequest, User};
use regbot_validation::{ValidationOutcome, ValidationRunner};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

// ─── Git ─────────────────────────────────────────────────────────────────────

/// Records git invocations, optionally failing the first command that
/// starts with the given subcommand
#[derive(Debug, Default)]
pub struct CommandLog {
    calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl CommandLog {
    pub fn failing_on(subcommand: &'static str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(subcommand),
        }
    }

    /// Every recorded command line, arguments joined by spaces
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for CommandLog {
    async fn run(&self, args: &[&str]) -> regbot_git::Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.join(" "));
        if self.fail_on == args.first().copied() {
            return Err(regbot_git::Error::command_failed(
                std::iter::once("git")
                    .chain(args.iter().copied())
                    .map(String::from)
                    .collect(),
                Some(128),
                "fatal: simulated failure",
            ));
        }
        Ok(CommandOutput::default())
    }
}

/// The exact git sequence for resolving `publish/issue<issue>`
pub fn expected_commands(category: &str, name: &str, issue: u64, login: &str) -> Vec<String> {
    let branch = format!("publish/issue{}", issue);
    vec![
        "fetch origin".to_string(),
        format!("checkout {}", branch),
        "checkout master".to_string(),
        format!("switch -C {}", branch),
        format!("config --global user.name {}", login),
        format!("config --global user.email {}@users.noreply.github.com", login),
        "add -A".to_string(),
        format!("commit -m :beers: publish {} {} (#{})", category, name, issue),
        "fetch origin".to_string(),
        format!("diff origin/{} {}", branch, branch),
        format!("push origin {} -f", branch),
    ]
}

// ─── Issue tracker ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockTracker {
    issues: HashMap<u64, Issue>,
    comments: HashMap<u64, Vec<Comment>>,
    requests: Mutex<Vec<String>>,
}

impl MockTracker {
    pub fn with_issue(mut self, number: u64, body: &str, login: &str, id: u64) -> Self {
        self.issues.insert(
            number,
            Issue {
                number,
                title: String::new(),
                body: Some(body.to_string()),
                user: User {
                    login: login.to_string(),
                    id,
                },
            },
        );
        self
    }

    pub fn with_comments(mut self, number: u64, bodies: &[&str]) -> Self {
        let comments = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| Comment {
                id: i as u64 + 1,
                body: Some(body.to_string()),
            })
            .collect();
        self.comments.insert(number, comments);
        self
    }

    /// API calls made so far, e.g. `get_issue 1`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn get_issue(&self, number: u64) -> regbot_github::Result<Issue> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("get_issue {}", number));
        self.issues.get(&number).cloned().ok_or_else(|| {
            regbot_github::Error::api(format!("issues/{}", number), 404, "Not Found")
        })
    }

    async fn list_comments(&self, number: u64) -> regbot_github::Result<Vec<Comment>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("list_comments {}", number));
        Ok(self.comments.get(&number).cloned().unwrap_or_default())
    }

    async fn list_pull_requests(&self) -> regbot_github::Result<Vec<PullRequest>> {
        Ok(Vec::new())
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MockValidator {
    outcome: ValidationOutcome,
    runs: Mutex<Vec<PluginSubmission>>,
}

impl MockValidator {
    pub fn passing(metadata: PluginMetadata) -> Self {
        Self::returning(Some(metadata), true)
    }

    pub fn returning(metadata: Option<PluginMetadata>, passed: bool) -> Self {
        Self {
            outcome: ValidationOutcome {
                metadata,
                passed,
                output: "plugin test output".to_string(),
            },
            runs: Mutex::new(Vec::new()),
        }
    }

    /// Submissions the validator was run against
    pub fn runs(&self) -> Vec<PluginSubmission> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValidationRunner for MockValidator {
    async fn run(
        &self,
        submission: &PluginSubmission,
    ) -> regbot_validation::Result<ValidationOutcome> {
        self.runs.lock().unwrap().push(submission.clone());
        Ok(self.outcome.clone())
    }
}

pub fn plugin_metadata() -> PluginMetadata {
    PluginMetadata {
        name: "name".to_string(),
        desc: "desc".to_string(),
        homepage: "https://nonebot.dev".to_string(),
        plugin_type: Some("application".to_string()),
        supported_adapters: Some(vec!["~onebot.v11".to_string()]),
    }
}

// ─── Issue bodies ────────────────────────────────────────────────────────────

pub const TAGS: &str = r##"[{"label": "test", "color": "#ffffff"}]"##;

pub fn adapter_body() -> String {
    format!(
        "### 名称\n\nname\n\n### 描述\n\ndesc\n\n### PyPI 项目名\n\nproject_link\n\n### 导入包名\n\nmodule_name\n\n### 项目仓库/主页链接\n\nhttps://nonebot.dev\n\n### 标签\n\n{}\n",
        TAGS
    )
}

pub fn bot_body() -> String {
    format!(
        "### 名称\n\nname\n\n### 描述\n\ndesc\n\n### 项目仓库/主页链接\n\nhttps://nonebot.dev\n\n### 标签\n\n{}\n",
        TAGS
    )
}

/// Plugin body that also carries name/desc/homepage, which must be ignored
pub fn plugin_body() -> String {
    format!(
        "### 名称\n\nissue name\n\n### 描述\n\nissue desc\n\n### 项目仓库/主页链接\n\nhttps://example.com\n\n### PyPI 项目名\n\nproject_link\n\n### 导入包名\n\nmodule_name\n\n### 标签\n\n{}\n\n### 插件配置项\n\n```dotenv\nlog_level=DEBUG\n```\n",
        TAGS
    )
}

// ─── Registry files ──────────────────────────────────────────────────────────

/// Registry files in a temp directory standing in for the working tree
pub struct RegistryFixture {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl RegistryFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap().to_path_buf();
        fs::create_dir_all(root.join("assets")).unwrap();

        let fixture = Self { _temp: temp, root };
        fixture.write("assets/adapters.json", "[]");
        fixture.write("assets/bots.json", "[]");
        fixture.write("assets/plugins.json", "[]");
        fixture
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn write(&self, relative: &str, content: &str) {
        fs::write(self.root.join(relative), content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }

    pub fn json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).unwrap()
    }

    /// Store over the default registry paths, rooted at the fixture
    pub fn store(&self) -> JsonRegistryStore {
        JsonRegistryStore::rooted_at(&RegistryConfig::default(), &self.root)
    }

    pub fn tree<'a>(&self, log: &'a CommandLog) -> WorkingTree<&'a CommandLog> {
        WorkingTree::new(log, self.root.clone(), &GitWorkflowConfig::default())
    }
}
