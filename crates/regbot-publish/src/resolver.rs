//! Rebuilding conflicting publish branches

use crate::candidate::PullRequestCandidate;
use crate::error::{Error, Result};
use crate::report::{Outcome, ResolutionReport, SkipReason};
use regbot_core::issue::parse_submission;
use regbot_core::registry::RegistryStore;
use regbot_core::types::{Category, PluginMetadata, RegistryEntry, SubmissionRecord};
use regbot_git::{CommandRunner, WorkingTree};
use regbot_github::{Comment, IssueTracker};
use regbot_validation::ValidationRunner;
use tracing::{debug, info, warn};

/// Prefix of a maintainer comment line naming the plugin to publish
const PLUGIN_HINT_PREFIX: &str = "Plugin: ";

/// Result of a single candidate that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        category: Category,
        issue: u64,
        name: String,
    },
    Skipped(SkipReason),
}

impl From<Resolution> for Outcome {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Resolved {
                category,
                issue,
                name,
            } => Outcome::Resolved {
                category,
                issue,
                name,
            },
            Resolution::Skipped(reason) => Outcome::Skipped { reason },
        }
    }
}

/// Commit message for a published entry
pub fn commit_message(category: Category, name: &str, issue: u64) -> String {
    format!(":beers: publish {} {} (#{})", category, name, issue)
}

/// Latest non-empty `Plugin: ` line across the comments, with the prefix removed
pub fn find_plugin_hint(comments: &[Comment]) -> Option<String> {
    comments.iter().rev().find_map(|comment| {
        comment.body.as_deref()?.lines().rev().find_map(|line| {
            let hint = line.trim_start().strip_prefix(PLUGIN_HINT_PREFIX)?.trim();
            (!hint.is_empty()).then(|| hint.to_string())
        })
    })
}

/// Replays publish issues over fresh branches
///
/// Candidates are processed strictly one after another: they all share the
/// single [`WorkingTree`] handed to [`ConflictResolver::resolve`].
pub struct ConflictResolver<'a, S> {
    tracker: &'a dyn IssueTracker,
    validator: &'a dyn ValidationRunner,
    store: S,
}

impl<'a, S: RegistryStore> ConflictResolver<'a, S> {
    pub fn new(
        tracker: &'a dyn IssueTracker,
        validator: &'a dyn ValidationRunner,
        store: S,
    ) -> Self {
        Self {
            tracker,
            validator,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve every candidate in order
    ///
    /// A failed candidate is recorded and the pass moves on to the next one.
    pub async fn resolve<R: CommandRunner>(
        &self,
        tree: &mut WorkingTree<R>,
        candidates: &[PullRequestCandidate],
    ) -> ResolutionReport {
        let mut report = ResolutionReport::default();

        for candidate in candidates {
            let outcome = match self.resolve_candidate(tree, candidate).await {
                Ok(resolution) => resolution.into(),
                Err(error) => {
                    warn!(
                        "Failed to resolve pull request #{} ({}): {}",
                        candidate.number, candidate.branch, error
                    );
                    Outcome::Failed { error }
                }
            };
            report.push(candidate.number, &candidate.branch, outcome);
        }

        info!(
            "Resolution pass finished: {} resolved, {} skipped, {} failed",
            report.resolved(),
            report.skipped(),
            report.failed()
        );
        report
    }

    /// Resolve one candidate, stopping at the first failing step
    ///
    /// Steps already applied to the working tree are not rolled back.
    pub async fn resolve_candidate<R: CommandRunner>(
        &self,
        tree: &mut WorkingTree<R>,
        candidate: &PullRequestCandidate,
    ) -> Result<Resolution> {
        if candidate.draft {
            info!("Skipping draft pull request #{}", candidate.number);
            return Ok(Resolution::Skipped(SkipReason::Draft));
        }

        let Some(issue_number) = candidate.issue_number() else {
            info!(
                "Skipping pull request #{}: {} is not a publish branch",
                candidate.number, candidate.branch
            );
            return Ok(Resolution::Skipped(SkipReason::BranchMismatch));
        };

        let Some(category) = candidate.category() else {
            warn!(
                "Skipping pull request #{}: no category label in {:?}",
                candidate.number, candidate.labels
            );
            return Ok(Resolution::Skipped(SkipReason::NoCategoryLabel));
        };

        info!(
            "Resolving {} pull request #{} from issue #{}",
            category, candidate.number, issue_number
        );

        let issue = self.tracker.get_issue(issue_number).await?;
        let record = parse_submission(category, issue.body_text())?;
        let metadata = self.plugin_metadata(issue_number, &record).await?;

        let entry = match record.into_entry(issue.user.id, metadata) {
            Some(entry) => entry,
            None => {
                return Err(Error::validation_failed(
                    format!("issue #{}", issue_number),
                    "no plugin metadata",
                ))
            }
        };

        tree.recreate_branch(&candidate.branch).await?;
        tree.configure_identity(&issue.user.login).await?;

        self.append_entry(&entry)?;

        let message = commit_message(category, entry.name(), issue_number);
        tree.commit_all(&message).await?;
        tree.force_push(&candidate.branch).await?;

        info!("Resolved pull request #{}", candidate.number);
        Ok(Resolution::Resolved {
            category,
            issue: issue_number,
            name: entry.name().to_string(),
        })
    }

    /// Validation metadata for plugin submissions, `None` for other categories
    async fn plugin_metadata(
        &self,
        issue_number: u64,
        record: &SubmissionRecord,
    ) -> Result<Option<PluginMetadata>> {
        let SubmissionRecord::Plugin(submission) = record else {
            return Ok(None);
        };

        let comments = self.tracker.list_comments(issue_number).await?;
        let hint = find_plugin_hint(&comments);
        if let Some(hint) = &hint {
            debug!("Maintainer hint for issue #{}: {}", issue_number, hint);
        }

        let outcome = self.validator.run(submission).await?;

        let Some(metadata) = outcome.metadata else {
            return Err(Error::validation_failed(
                &submission.project_link,
                "validation run reported no metadata",
            ));
        };

        if !outcome.passed {
            match &hint {
                Some(hint) => warn!(
                    "Plugin {} did not pass validation; publishing anyway per hint '{}'",
                    submission.project_link, hint
                ),
                None => {
                    return Err(Error::validation_failed(
                        &submission.project_link,
                        outcome.output,
                    ))
                }
            }
        }

        Ok(Some(metadata))
    }

    fn append_entry(&self, entry: &RegistryEntry) -> Result<()> {
        let mut file = self.store.load(entry.category())?;
        let before = file.len();
        file.append(entry)?;
        self.store.save(&file)?;
        debug!(
            "Appended {} to {} ({} -> {} entries)",
            entry.name(),
            file.path(),
            before,
            file.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: u64, body: &str) -> Comment {
        Comment {
            id,
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn test_commit_message() {
        assert_eq!(
            commit_message(Category::Adapter, "name", 1),
            ":beers: publish adapter name (#1)"
        );
        assert_eq!(
            commit_message(Category::Plugin, "帮助", 42),
            ":beers: publish plugin 帮助 (#42)"
        );
    }

    #[test]
    fn test_plugin_hint_latest_wins() {
        let comments = vec![
            comment(1, "Plugin: first"),
            comment(2, "looks good"),
            comment(3, "checked again\nPlugin: second\n"),
            Comment { id: 4, body: None },
        ];
        assert_eq!(find_plugin_hint(&comments).as_deref(), Some("second"));
    }

    #[test]
    fn test_blank_plugin_hint_is_ignored() {
        assert_eq!(find_plugin_hint(&[comment(1, "Plugin: ")]), None);
        assert_eq!(find_plugin_hint(&[comment(1, "Plugin:    \n")]), None);

        let comments = vec![comment(1, "Plugin: earlier"), comment(2, "Plugin: ")];
        assert_eq!(find_plugin_hint(&comments).as_deref(), Some("earlier"));
    }

    #[test]
    fn test_plugin_hint_absent() {
        let comments = vec![comment(1, "Plugins: nope"), comment(2, "plugin: lower")];
        assert_eq!(find_plugin_hint(&comments), None);
        assert_eq!(find_plugin_hint(&[]), None);
    }
}
