//! Parse-issue command

use anyhow::{Context, Result};
use regbot_core::parse_submission;
use std::io::Read;

use crate::cli::ParseIssueArgs;

pub fn run(args: ParseIssueArgs) -> Result<()> {
    let body = read_input(&args.input)?;
    let record = parse_submission(args.category, &body)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read issue body from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}
