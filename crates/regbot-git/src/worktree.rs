//! The shared working tree a resolution pass operates on

use crate::error::Result;
use crate::runner::CommandRunner;
use camino::{Utf8Path, Utf8PathBuf};
use regbot_core::types::GitWorkflowConfig;
use tracing::{debug, info};

/// Git configuration scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Local repository config (.git/config)
    Local,
    /// Global user config (~/.gitconfig)
    Global,
}

impl ConfigScope {
    fn as_arg(&self) -> &'static str {
        match self {
            Self::Local => "--local",
            Self::Global => "--global",
        }
    }
}

/// Exclusive handle on the checkout every candidate is rebuilt in
///
/// Every step takes `&mut self`: switching branches is visible to anything
/// else using the same checkout, so a pass holds the handle for its whole
/// duration and candidates are processed strictly one after another.
pub struct WorkingTree<R> {
    runner: R,
    root: Utf8PathBuf,
    remote: String,
    base_branch: String,
    noreply_domain: String,
    identity_scope: ConfigScope,
}

impl<R: CommandRunner> WorkingTree<R> {
    pub fn new(runner: R, root: impl Into<Utf8PathBuf>, git: &GitWorkflowConfig) -> Self {
        Self {
            runner,
            root: root.into(),
            remote: git.remote.clone(),
            base_branch: git.base_branch.clone(),
            noreply_domain: git.noreply_domain.clone(),
            identity_scope: ConfigScope::Global,
        }
    }

    /// Scope committer identity is written to (global by default)
    pub fn with_identity_scope(mut self, scope: ConfigScope) -> Self {
        self.identity_scope = scope;
        self
    }

    /// Directory the checkout lives in
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Fetch the configured remote
    pub async fn fetch(&mut self) -> Result<()> {
        self.runner.run(&["fetch", self.remote.as_str()]).await?;
        Ok(())
    }

    /// Rebuild `branch` from the mainline
    ///
    /// Fetches, checks out the branch so a local copy exists, moves to the
    /// base branch and resets `branch` onto it with `switch -C`.
    pub async fn recreate_branch(&mut self, branch: &str) -> Result<()> {
        info!("Recreating {} from {}", branch, self.base_branch);
        self.fetch().await?;
        self.runner.run(&["checkout", branch]).await?;
        self.runner.run(&["checkout", self.base_branch.as_str()]).await?;
        self.runner.run(&["switch", "-C", branch]).await?;
        Ok(())
    }

    /// Commit as `login` with its GitHub no-reply address
    pub async fn configure_identity(&mut self, login: &str) -> Result<()> {
        let email = format!("{}@{}", login, self.noreply_domain);
        let scope = self.identity_scope.as_arg();
        self.runner.run(&["config", scope, "user.name", login]).await?;
        self.runner.run(&["config", scope, "user.email", email.as_str()]).await?;
        debug!("Committer identity set to {} <{}>", login, email);
        Ok(())
    }

    /// Stage every change and commit it
    pub async fn commit_all(&mut self, message: &str) -> Result<()> {
        self.runner.run(&["add", "-A"]).await?;
        self.runner.run(&["commit", "-m", message]).await?;
        info!("Committed: {}", message);
        Ok(())
    }

    /// Overwrite the remote branch with the local one
    ///
    /// The diff against the remote copy is only logged; it never gates the push.
    pub async fn force_push(&mut self, branch: &str) -> Result<()> {
        self.fetch().await?;
        let remote_ref = format!("{}/{}", self.remote, branch);
        let diff = self.runner.run(&["diff", remote_ref.as_str(), branch]).await?;
        if diff.stdout.trim().is_empty() {
            debug!("{} matches {}", branch, remote_ref);
        } else {
            debug!("Diff {} -> {}:\n{}", remote_ref, branch, diff.stdout);
        }
        self.runner.run(&["push", self.remote.as_str(), branch, "-f"]).await?;
        info!("Force-pushed {} to {}", branch, self.remote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runner::CommandOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl CommandRunner for Recorder {
        async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
            self.calls
                .lock()
                .unwrap()
                .push(args.iter().map(|a| a.to_string()).collect());
            if self.fail_on == Some(args[0]) {
                return Err(Error::command_failed(
                    args.iter().map(|a| a.to_string()).collect(),
                    Some(1),
                    "boom",
                ));
            }
            Ok(CommandOutput::default())
        }
    }

    fn calls(recorder: &Recorder) -> Vec<String> {
        recorder
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.join(" "))
            .collect()
    }

    #[tokio::test]
    async fn test_recreate_branch_sequence() {
        let recorder = Recorder::default();
        let mut tree = WorkingTree::new(&recorder, "/repo", &GitWorkflowConfig::default());

        tree.recreate_branch("publish/issue1").await.unwrap();

        assert_eq!(
            calls(&recorder),
            vec![
                "fetch origin",
                "checkout publish/issue1",
                "checkout master",
                "switch -C publish/issue1",
            ]
        );
    }

    #[tokio::test]
    async fn test_identity_uses_noreply_address() {
        let recorder = Recorder::default();
        let mut tree = WorkingTree::new(&recorder, "/repo", &GitWorkflowConfig::default());

        tree.configure_identity("he0119").await.unwrap();

        assert_eq!(
            calls(&recorder),
            vec![
                "config --global user.name he0119",
                "config --global user.email he0119@users.noreply.github.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_local_identity_scope() {
        let recorder = Recorder::default();
        let mut tree = WorkingTree::new(&recorder, "/repo", &GitWorkflowConfig::default())
            .with_identity_scope(ConfigScope::Local);

        tree.configure_identity("bot").await.unwrap();
        assert_eq!(calls(&recorder)[0], "config --local user.name bot");
    }

    #[tokio::test]
    async fn test_force_push_uses_configured_remote() {
        let recorder = Recorder::default();
        let git = GitWorkflowConfig {
            remote: "upstream".to_string(),
            ..Default::default()
        };
        let mut tree = WorkingTree::new(&recorder, "/repo", &git);

        tree.force_push("publish/issue2").await.unwrap();

        assert_eq!(
            calls(&recorder),
            vec![
                "fetch upstream",
                "diff upstream/publish/issue2 publish/issue2",
                "push upstream publish/issue2 -f",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_steps() {
        let recorder = Recorder {
            fail_on: Some("add"),
            ..Default::default()
        };
        let mut tree = WorkingTree::new(&recorder, "/repo", &GitWorkflowConfig::default());

        let err = tree.commit_all("msg").await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(calls(&recorder), vec!["add -A"]);
    }
}
