//! Pull requests under evaluation

use regbot_core::types::Category;
use regbot_github::PullRequest;
use regex::Regex;
use std::sync::LazyLock;

static BRANCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^publish/issue(\d+)$").expect("branch regex is valid"));

/// A pull request the resolver may rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestCandidate {
    /// Pull request number
    pub number: u64,
    /// Head branch name
    pub branch: String,
    pub draft: bool,
    /// Label names
    pub labels: Vec<String>,
    pub title: String,
}

impl PullRequestCandidate {
    pub fn new(number: u64, branch: impl Into<String>) -> Self {
        Self {
            number,
            branch: branch.into(),
            draft: false,
            labels: Vec::new(),
            title: String::new(),
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Issue number encoded in a `publish/issue<N>` branch name
    pub fn issue_number(&self) -> Option<u64> {
        BRANCH_RE
            .captures(&self.branch)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Category selected by the first recognised label
    pub fn category(&self) -> Option<Category> {
        Category::from_labels(&self.labels)
    }
}

impl From<PullRequest> for PullRequestCandidate {
    fn from(pull: PullRequest) -> Self {
        Self {
            number: pull.number,
            branch: pull.head.ref_name,
            draft: pull.draft,
            labels: pull.labels.into_iter().map(|l| l.name).collect(),
            title: pull.title,
        }
    }
}
