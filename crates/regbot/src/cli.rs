//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use regbot_core::Category;

/// regbot - rebuilds conflicting registry publish pull requests
#[derive(Parser, Debug)]
#[command(name = "regbot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to regbot.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild conflicting publish pull requests from their issues
    Resolve(ResolveArgs),

    /// Parse a publish issue body and print the submission as JSON
    ParseIssue(ParseIssueArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Only resolve these pull request numbers (repeatable)
    #[arg(short, long = "pull", value_name = "NUMBER")]
    pub pulls: Vec<u64>,

    /// Checkout of the registry repository (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub repo_dir: Option<Utf8PathBuf>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct ParseIssueArgs {
    /// Submission category
    #[arg(long, value_name = "adapter|bot|plugin")]
    pub category: Category,

    /// File holding the issue body, or - for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_args() {
        let cli = Cli::try_parse_from([
            "regbot",
            "-v",
            "resolve",
            "--pull",
            "12",
            "--pull",
            "13",
            "--repo-dir",
            "/tmp/registry",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.pulls, vec![12, 13]);
                assert_eq!(args.repo_dir.as_deref().map(|p| p.as_str()), Some("/tmp/registry"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_issue_category() {
        let cli = Cli::try_parse_from(["regbot", "parse-issue", "--category", "Plugin", "body.md"])
            .unwrap();
        match cli.command {
            Commands::ParseIssue(args) => {
                assert_eq!(args.category, Category::Plugin);
                assert_eq!(args.input, "body.md");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["regbot", "parse-issue", "--category", "driver"]).is_err());
    }
}
