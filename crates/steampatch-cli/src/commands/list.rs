//! List command implementation.

use anyhow::{Context, Result};
use steampatch::{ReplacementPayload, find_installations};

use super::{RULE, format_record, scope_label};
use crate::config::RunConfig;

/// List installations and their patch state
pub fn run(config: &RunConfig, payload: &ReplacementPayload, json: bool) -> Result<()> {
    let records = find_installations(&config.search_dir, config.include_unanchored, payload);

    if json {
        let content =
            serde_json::to_string_pretty(&records).context("Failed to serialize listing")?;
        println!("{}", content);
        return Ok(());
    }

    println!(
        "Listing Steam games ({})...",
        scope_label(config.include_unanchored)
    );
    println!("Found {} games.", records.len());
    if !records.is_empty() {
        println!("{}", RULE);
        for record in &records {
            println!("{}", format_record(record));
        }
        println!("{}", RULE);
    }

    Ok(())
}
