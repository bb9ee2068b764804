//! # regbot-publish
//!
//! Rebuilds conflicting `publish/issue<N>` pull requests from their issues.
//!
//! For every candidate the resolver re-creates the branch from the base
//! branch, re-derives the registry entry from the originating issue (and, for
//! plugins, from a validation run), appends it to the category's registry
//! file, commits as the issue author and force-pushes.

pub mod candidate;
pub mod error;
pub mod report;
pub mod resolver;

pub use candidate::PullRequestCandidate;
pub use error::{Error, Result};
pub use report::{CandidateReport, Outcome, ResolutionReport, SkipReason};
pub use resolver::{commit_message, find_plugin_hint, ConflictResolver, Resolution};
