//! Resolve command

use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regbot_core::JsonRegistryStore;
use regbot_git::{GitCommandRunner, WorkingTree};
use regbot_github::{GitHubClient, IssueTracker};
use regbot_publish::{ConflictResolver, PullRequestCandidate, ResolutionReport};
use regbot_validation::DockerPluginTest;
use tracing::{debug, warn};

use super::load_config;
use crate::cli::ResolveArgs;
use crate::output;

pub async fn run(args: ResolveArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let root = match args.repo_dir {
        Some(dir) => dir,
        None => Utf8PathBuf::try_from(std::env::current_dir()?)
            .context("Current directory path is not valid UTF-8")?,
    };
    debug!("Working tree: {}", root);

    if args.token.is_none() {
        warn!("GITHUB_TOKEN is not set; API requests are unauthenticated");
    }
    let client = GitHubClient::new(&config.github, args.token.as_deref())
        .context("Failed to create GitHub client")?;

    let pulls = client
        .list_pull_requests()
        .await
        .with_context(|| {
            format!(
                "Failed to list pull requests of {}/{}",
                config.github.owner, config.github.repo
            )
        })?;
    let candidates = select_candidates(pulls.into_iter().map(Into::into).collect(), &args.pulls);

    if candidates.is_empty() {
        output::info("No open pull requests to resolve");
        return Ok(());
    }

    let validator = DockerPluginTest::new(&config.validation);
    let store = JsonRegistryStore::rooted_at(&config.registry, &root);
    let runner = GitCommandRunner::new(config.git.program.as_str()).in_dir(root.clone());
    let mut tree = WorkingTree::new(runner, root, &config.git);

    let resolver = ConflictResolver::new(&client, &validator, store);
    let report = resolver.resolve(&mut tree, &candidates).await;

    print_report(&report);

    if report.has_failures() {
        bail!(
            "{} of {} pull requests could not be resolved",
            report.failed(),
            report.candidates.len()
        );
    }
    Ok(())
}

/// Keep only the requested pull requests, or all of them when none are requested
fn select_candidates(
    candidates: Vec<PullRequestCandidate>,
    requested: &[u64],
) -> Vec<PullRequestCandidate> {
    if requested.is_empty() {
        return candidates;
    }

    for number in requested {
        if !candidates.iter().any(|c| c.number == *number) {
            output::warning(&format!("Pull request #{} is not open", number));
        }
    }
    candidates
        .into_iter()
        .filter(|c| requested.contains(&c.number))
        .collect()
}

fn print_report(report: &ResolutionReport) {
    output::header("Resolution summary");
    for candidate in &report.candidates {
        output::candidate(candidate);
    }
    output::totals(report);
}
