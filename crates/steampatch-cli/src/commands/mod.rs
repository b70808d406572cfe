//! CLI command implementations.

pub mod list;
pub mod process;

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use steampatch::InstallationRecord;

/// Placeholder shown for an unresolved application id
const UNKNOWN_APP_ID: &str = "???";

/// Horizontal rule printed around record listings
pub const RULE: &str = "---";

/// One-line description of a record:
/// `(<appid>) <name> at <path> [PATCHED:YES|NO]`
pub fn format_record(record: &InstallationRecord) -> String {
    format!(
        "({}) {} at {} [PATCHED:{}]",
        record.application_id().unwrap_or(UNKNOWN_APP_ID),
        record.name(),
        record.scan_path().display(),
        patched_label(record.is_patched(), std::io::stdout().is_terminal()),
    )
}

fn patched_label(patched: bool, color: bool) -> String {
    match (patched, color) {
        (true, true) => "YES".green().to_string(),
        (false, true) => "NO".yellow().to_string(),
        (true, false) => "YES".to_string(),
        (false, false) => "NO".to_string(),
    }
}

/// Describe the search scope for progress messages
pub fn scope_label(include_unanchored: bool) -> &'static str {
    if include_unanchored {
        "any directory"
    } else {
        "steamapps directories only"
    }
}
