//! Prelude module for convenient imports
//!
//! ```ignore
//! use steampatch::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Payload: `ReplacementPayload`, `Arch`
//! - Discovery: `InstallationRecord`, `find_installations`, `scan`
//! - Patching: `patch`, `unpatch` and their outcomes
//! - Batch: `run_batch`, `Policy`, `Action`, `ActionPrompter`
//! - Error handling: `Error`, `Result`

pub use crate::batch::{Action, ActionPrompter, BatchSummary, Policy, RecordEvent, run_batch};
pub use crate::discovery::{InstallationRecord, ScanReport, find_installations, scan};
pub use crate::error::{Error, Result};
pub use crate::layout::Arch;
pub use crate::patch::{PatchOutcome, UnpatchOutcome, patch, unpatch};
pub use crate::payload::ReplacementPayload;
