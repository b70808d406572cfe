//! Discovery of Steam installations on disk.
//!
//! This module walks a directory tree looking for installation directories
//! and describes each one it finds:
//!
//! - **Walk**: depth-first scan gated by the `steamapps` anchoring rule
//! - **Install root**: the title folder directly below `common`
//! - **Application id**: `steam_appid.txt`, emulator settings, or the library
//!   `appmanifest_<id>.acf` files
//! - **Patch state**: byte comparison of the marker against the payload
//!
//! Everything here is best-effort. Filesystem errors never abort a scan; the
//! `lookup_*` functions report them as [`Lookup::Failed`] for diagnostics while
//! the plain resolvers fold them into "unresolved".

mod app_id;
mod install_root;
mod patched;
mod walk;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::payload::ReplacementPayload;

pub use app_id::{lookup_application_id, resolve_application_id};
pub use install_root::resolve_install_root;
pub use patched::{compute_is_patched, lookup_is_patched};
pub use walk::{ScanReport, SkippedDir, find_installations, scan};

/// Outcome of a best-effort filesystem lookup
#[derive(Debug)]
pub enum Lookup<T> {
    /// The value was determined
    Found(T),
    /// Definitively not present
    Absent,
    /// Could not be determined because of an I/O error
    Failed(io::Error),
}

impl<T> Lookup<T> {
    /// Collapse to the best-effort result, treating failures as absent
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent | Lookup::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The I/O error that prevented the lookup, if any
    pub fn error(&self) -> Option<&io::Error> {
        match self {
            Lookup::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn from_io(result: io::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::Absent,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Lookup::Absent,
            Err(e) => Lookup::Failed(e),
        }
    }
}

/// One discovered installation directory
///
/// A record is a snapshot taken at discovery time. Re-scanning produces new
/// records; nothing here is updated after a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationRecord {
    scan_path: PathBuf,
    install_root: PathBuf,
    application_id: Option<String>,
    is_patched: bool,
}

impl InstallationRecord {
    /// Describe the installation whose marker binary lives in `scan_path`
    pub fn inspect(scan_path: PathBuf, payload: &ReplacementPayload) -> Self {
        let install_root = resolve_install_root(&scan_path);
        let application_id = resolve_application_id(&scan_path);
        let is_patched = compute_is_patched(&scan_path, payload);

        Self {
            scan_path,
            install_root,
            application_id,
            is_patched,
        }
    }

    /// Directory containing the marker binary
    pub fn scan_path(&self) -> &Path {
        &self.scan_path
    }

    /// Top-level folder of the title
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Display name of the title (the install root's folder name)
    pub fn name(&self) -> String {
        self.install_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.install_root.display().to_string())
    }

    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Patch state observed at discovery time
    pub fn is_patched(&self) -> bool {
        self.is_patched
    }
}
