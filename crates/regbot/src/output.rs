//! Terminal output for resolution passes

use console::style;
use regbot_publish::{CandidateReport, Outcome, ResolutionReport};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// One line per candidate, marked by its outcome; failures go to stderr
pub fn candidate(report: &CandidateReport) {
    let line = candidate_line(report);
    match report.outcome {
        Outcome::Resolved { .. } => println!("{} {}", style("✓").green().bold(), line),
        Outcome::Skipped { .. } => println!("{} {}", style("-").dim(), style(line).dim()),
        Outcome::Failed { .. } => eprintln!("{} {}", style("✗").red().bold(), line),
    }
}

/// Resolved/skipped/failed counts
pub fn totals(report: &ResolutionReport) {
    println!(
        "  {} resolved, {} skipped, {} failed",
        style(report.resolved()).green(),
        style(report.skipped()).dim(),
        style(report.failed()).red()
    );
}

fn candidate_line(report: &CandidateReport) -> String {
    format!(
        "#{} {}: {}",
        report.pull_number, report.branch, report.outcome
    )
}
