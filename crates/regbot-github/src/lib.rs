//! # regbot-github
//!
//! Access to the registry repository's issues and pull requests.
//!
//! The resolver only depends on the [`IssueTracker`] trait; [`GitHubClient`]
//! implements it over the GitHub REST API.

mod client;
mod error;
pub mod types;

pub use client::{GitHubClient, IssueTracker, RepoInfo};
pub use error::{Error, Result};
pub use types::{Comment, Issue, Label, PullRequest, PullRequestHead, User};
