//! Per-candidate results of a resolution pass

use crate::error::Error;
use regbot_core::types::Category;
use std::fmt;

/// Why a candidate was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Draft,
    /// Branch name is not `publish/issue<N>`
    BranchMismatch,
    /// None of the labels names a category
    NoCategoryLabel,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Draft => "draft pull request",
            Self::BranchMismatch => "branch is not a publish branch",
            Self::NoCategoryLabel => "no category label",
        };
        f.write_str(text)
    }
}

/// What happened to one candidate
#[derive(Debug)]
pub enum Outcome {
    /// Branch rebuilt and force-pushed
    Resolved {
        category: Category,
        issue: u64,
        name: String,
    },
    Skipped {
        reason: SkipReason,
    },
    /// Resolution aborted; earlier steps are not rolled back
    Failed {
        error: Error,
    },
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved {
                category,
                issue,
                name,
            } => write!(f, "resolved {} {} (#{})", category, name, issue),
            Self::Skipped { reason } => write!(f, "skipped: {}", reason),
            Self::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

#[derive(Debug)]
pub struct CandidateReport {
    pub pull_number: u64,
    pub branch: String,
    pub outcome: Outcome,
}

/// Results of a pass, in input order
#[derive(Debug, Default)]
pub struct ResolutionReport {
    pub candidates: Vec<CandidateReport>,
}

impl ResolutionReport {
    pub fn push(&mut self, pull_number: u64, branch: impl Into<String>, outcome: Outcome) {
        self.candidates.push(CandidateReport {
            pull_number,
            branch: branch.into(),
            outcome,
        });
    }

    pub fn resolved(&self) -> usize {
        self.count(Outcome::is_resolved)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::is_skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: fn(&Outcome) -> bool) -> usize {
        self.candidates.iter().filter(|c| pred(&c.outcome)).count()
    }
}
