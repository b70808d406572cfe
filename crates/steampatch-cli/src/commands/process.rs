//! Patch, unpatch and interactive commands.

use steampatch::{ActionPrompter, BatchSummary, Policy, ReplacementPayload, run_batch, scan};
use tracing::debug;

use super::{RULE, scope_label};
use crate::config::RunConfig;

/// Discover installations and run `policy` over them
pub fn run(
    config: &RunConfig,
    payload: &ReplacementPayload,
    policy: Policy,
    prompter: &dyn ActionPrompter,
) -> BatchSummary {
    println!(
        "Searching Steam games ({})...",
        scope_label(config.include_unanchored)
    );
    let report = scan(&config.search_dir, config.include_unanchored, payload);
    for skipped in &report.skipped {
        debug!("Skipped {}: {}", skipped.path.display(), skipped.error);
    }

    println!("Found {} games.", report.records.len());
    let summary = if report.records.is_empty() {
        BatchSummary::default()
    } else {
        println!("{}", RULE);
        let summary = run_batch(&report.records, payload, policy, prompter);
        println!("{}", RULE);
        summary
    };

    println!("Total patched: {}", summary.patched);
    println!("Total unpatched: {}", summary.unpatched);
    println!("Total errors: {}", summary.errors);
    if !summary.is_success() {
        println!("ERROR: One or more errors encountered.");
    }

    summary
}
