//! Patch and unpatch of a single installation.
//!
//! An installation is either `ORIGINAL` (vendor binary in place) or `PATCHED`
//! (replacement binary in place, original kept as `<marker>.old`).
//!
//! ## Patch steps
//!
//! 1. `steam_appid.txt` (create if absent)
//! 2. `steam_settings/` with app id and flag files (only if the directory is new)
//! 3. Locate the marker binary, 32-bit first
//! 4. Stop if it already equals the replacement
//! 5. `steam_interfaces.txt` extracted from the original (create if absent)
//! 6. Backup the original to `<marker>.old`
//! 7. Overwrite the marker with the replacement
//!
//! Every step is idempotent, so re-running after a failure converges to the
//! same end state. The backup is always written before the overwrite.

mod interfaces;
mod settings;

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, IoResultExt, Result};
use crate::layout::{Arch, INTERFACES_FILE, locate_backup, locate_marker};
use crate::payload::ReplacementPayload;

pub use interfaces::{extract_interfaces, format_interfaces};
pub use settings::{ensure_app_id_file, ensure_settings_dir};

/// Result of a successful [`patch`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The marker binary was replaced
    Patched(Arch),
    /// The marker binary already was the replacement
    AlreadyPatched(Arch),
    /// The directory no longer contains a marker binary
    NoMarker,
}

/// Result of a successful [`unpatch`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpatchOutcome {
    /// The original binary was restored from its backup
    Restored(Arch),
    /// No backup exists, so this tool never patched the installation
    NothingToRestore,
}

/// Replace the vendor binary in `install_dir` with the payload.
///
/// `app_id` must be non-empty; an empty id is reported as
/// [`Error::MissingAppId`] before anything is touched. I/O failures are
/// returned as-is and nothing is rolled back.
pub fn patch(
    install_dir: &Path,
    app_id: &str,
    payload: &ReplacementPayload,
) -> Result<PatchOutcome> {
    let app_id = app_id.trim();
    if app_id.is_empty() {
        return Err(Error::MissingAppId(install_dir.to_path_buf()));
    }

    // Re-validate: the directory may have changed since discovery
    if locate_marker(install_dir).is_none() {
        warn!("No vendor binary in {}, skipping", install_dir.display());
        return Ok(PatchOutcome::NoMarker);
    }

    ensure_app_id_file(install_dir, app_id)?;
    ensure_settings_dir(install_dir, app_id)?;

    let Some((arch, marker)) = locate_marker(install_dir) else {
        warn!(
            "Vendor binary disappeared from {}, aborting",
            install_dir.display()
        );
        return Ok(PatchOutcome::NoMarker);
    };

    let original = fs::read(&marker).at(&marker)?;
    let replacement = payload.for_arch(arch);
    if original == replacement {
        info!("{} is already patched", marker.display());
        return Ok(PatchOutcome::AlreadyPatched(arch));
    }

    let interfaces_path = install_dir.join(INTERFACES_FILE);
    if !interfaces_path.exists() {
        let found = extract_interfaces(&original);
        info!(
            "Extracted {} interface(s) to {}",
            found.len(),
            interfaces_path.display()
        );
        settings::write_if_absent(&interfaces_path, format_interfaces(&found).as_bytes())?;
    }

    let backup = arch.backup_path(install_dir);
    fs::write(&backup, &original).at(&backup)?;
    info!("Backed up original to {}", backup.display());

    fs::write(&marker, replacement).at(&marker)?;
    info!("Patched {} ({})", marker.display(), arch);

    Ok(PatchOutcome::Patched(arch))
}

/// Restore the original vendor binary in `install_dir` from its backup.
///
/// Without a backup this is a no-op. Configuration files written by
/// [`patch`] are kept.
pub fn unpatch(install_dir: &Path) -> Result<UnpatchOutcome> {
    let Some((arch, backup)) = locate_backup(install_dir) else {
        info!("No backup in {}, nothing to restore", install_dir.display());
        return Ok(UnpatchOutcome::NothingToRestore);
    };

    let marker = arch.marker_path(install_dir);
    fs::rename(&backup, &marker).at(&backup)?;
    info!("Restored {} from {}", marker.display(), backup.display());

    Ok(UnpatchOutcome::Restored(arch))
}
