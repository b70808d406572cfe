//! Batch processing of discovered installations.
//!
//! Each record is handled independently under a caller-chosen policy: apply
//! one action to everything, or ask the [`ActionPrompter`] per record.
//! Failures are counted and reported, never propagated, so one broken
//! installation does not stop the rest.

use tracing::debug;

use crate::discovery::InstallationRecord;
use crate::error::Error;
use crate::patch::{self, PatchOutcome, UnpatchOutcome};
use crate::payload::ReplacementPayload;

/// What to do with one installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Patch,
    Unpatch,
    Skip,
}

impl Action {
    /// Parse a prompt answer: `p` patches, `u` unpatches, anything else skips
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "p" => Self::Patch,
            "u" => Self::Unpatch,
            _ => Self::Skip,
        }
    }
}

/// How actions are chosen for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Apply the same action to every record
    Apply(Action),
    /// Ask the prompter for each record
    Ask,
}

/// What happened to one record
#[derive(Debug)]
pub enum RecordEvent {
    Patched(PatchOutcome),
    /// Patch requested on a record discovered as patched
    AlreadyPatched,
    Unpatched(UnpatchOutcome),
    /// Unpatch requested on a record discovered as not patched
    NotPatched,
    Skipped,
    Failed(Error),
}

/// Interface for choosing actions and reporting progress
///
/// Implemented by the command line front end; tests use scripted versions.
pub trait ActionPrompter {
    /// Called once per record before anything else happens to it
    fn announce(&self, _record: &InstallationRecord) {}

    /// Choose the action for a record (only asked under [`Policy::Ask`])
    fn choose(&self, record: &InstallationRecord) -> Action;

    /// Report the result for a record
    fn report(&self, record: &InstallationRecord, event: &RecordEvent);
}

/// Totals for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub patched: usize,
    pub unpatched: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    fn record(&mut self, event: &RecordEvent) {
        match event {
            RecordEvent::Patched(PatchOutcome::Patched(_)) => self.patched += 1,
            RecordEvent::Unpatched(UnpatchOutcome::Restored(_)) => self.unpatched += 1,
            RecordEvent::Failed(_) => self.errors += 1,
            _ => {}
        }
    }
}

/// Run `policy` over every record
pub fn run_batch(
    records: &[InstallationRecord],
    payload: &ReplacementPayload,
    policy: Policy,
    prompter: &dyn ActionPrompter,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for record in records {
        prompter.announce(record);

        let action = match policy {
            Policy::Apply(action) => action,
            Policy::Ask => prompter.choose(record),
        };
        debug!("{:?} {}", action, record.scan_path().display());

        let event = apply(record, action, payload);
        summary.record(&event);
        prompter.report(record, &event);
    }

    summary
}

fn apply(record: &InstallationRecord, action: Action, payload: &ReplacementPayload) -> RecordEvent {
    match action {
        Action::Patch if record.is_patched() => RecordEvent::AlreadyPatched,
        Action::Patch => {
            let dir = record.scan_path();
            let Some(app_id) = record.application_id() else {
                return RecordEvent::Failed(Error::MissingAppId(dir.to_path_buf()));
            };
            match patch::patch(dir, app_id, payload) {
                Ok(outcome) => RecordEvent::Patched(outcome),
                Err(e) => RecordEvent::Failed(e),
            }
        }
        Action::Unpatch if !record.is_patched() => RecordEvent::NotPatched,
        Action::Unpatch => match patch::unpatch(record.scan_path()) {
            Ok(outcome) => RecordEvent::Unpatched(outcome),
            Err(e) => RecordEvent::Failed(e),
        },
        Action::Skip => RecordEvent::Skipped,
    }
}
