//! # steampatch
//!
//! Core library for discovering Steam installations and swapping their
//! `steam_api` binaries for a bundled replacement.
//!
//! This crate provides:
//! - Discovery of installation directories below a search root
//! - Install root, application id and patch state resolution
//! - Reversible patch/unpatch with emulator configuration generation
//! - A batch driver applying a policy over discovered installations
//!
//! Everything is synchronous and single-threaded. The replacement payload is
//! loaded once up front and passed by reference to every operation.

pub mod batch;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod patch;
pub mod payload;
pub mod prelude;

pub use batch::{Action, ActionPrompter, BatchSummary, Policy, RecordEvent, run_batch};
pub use discovery::{
    InstallationRecord, Lookup, ScanReport, SkippedDir, compute_is_patched, find_installations,
    lookup_application_id, lookup_is_patched, resolve_application_id, resolve_install_root, scan,
};
pub use error::{Error, Result};
pub use layout::{Arch, locate_backup, locate_marker};
pub use patch::{PatchOutcome, UnpatchOutcome, extract_interfaces, patch, unpatch};
pub use payload::ReplacementPayload;
