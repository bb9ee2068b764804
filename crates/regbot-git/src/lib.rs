//! # regbot-git
//!
//! Git plumbing for regbot:
//! - [`CommandRunner`]: runs one git command with captured output, failing
//!   fast on a non-zero exit
//! - [`WorkingTree`]: the shared checkout, exposing the branch rebuild,
//!   commit and force-push steps of a conflict resolution
//!
//! All commands of a resolution go through a single `WorkingTree` borrowed
//! mutably, so two candidates can never interleave their branch switches.

mod error;
mod runner;
mod worktree;

pub use error::{Error, Result};
pub use runner::{CommandOutput, CommandRunner, GitCommandRunner};
pub use worktree::{ConfigScope, WorkingTree};
