//! On-disk layout of a Steam installation directory.
//!
//! All file names the discovery and patch engines read or write are defined
//! here, together with the marker lookup shared by both.

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, IntoEnumIterator};

/// Directory name that anchors a search to a managed Steam library
pub const STEAMAPPS_DIR: &str = "steamapps";
/// Parent directory name of every install root inside a Steam library
pub const COMMON_DIR: &str = "common";

/// Application id file, read by discovery and written by patch
pub const APP_ID_FILE: &str = "steam_appid.txt";
/// Emulator settings directory
pub const SETTINGS_DIR: &str = "steam_settings";
/// Extracted interface version list
pub const INTERFACES_FILE: &str = "steam_interfaces.txt";
/// Suffix appended to a marker file name to form its backup
pub const BACKUP_SUFFIX: &str = ".old";

/// Files populated inside a freshly created settings directory, besides the app id
pub const SETTINGS_FLAGS: [&str; 3] = [
    "offline.txt",
    "disable_overlay.txt",
    "disable_networking.txt",
];

/// Architecture of a vendor binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Arch {
    #[strum(to_string = "32-bit")]
    X86,
    #[strum(to_string = "64-bit")]
    X64,
}

impl Arch {
    /// File name of the vendor binary for this architecture
    pub fn marker_name(self) -> &'static str {
        match self {
            Self::X86 => "steam_api.dll",
            Self::X64 => "steam_api64.dll",
        }
    }

    /// File name of the backup sidecar for this architecture
    pub fn backup_name(self) -> String {
        format!("{}{}", self.marker_name(), BACKUP_SUFFIX)
    }

    pub fn marker_path(self, dir: &Path) -> PathBuf {
        dir.join(self.marker_name())
    }

    pub fn backup_path(self, dir: &Path) -> PathBuf {
        dir.join(self.backup_name())
    }
}

/// Find the marker binary in `dir`, 32-bit first.
pub fn locate_marker(dir: &Path) -> Option<(Arch, PathBuf)> {
    Arch::iter()
        .map(|arch| (arch, arch.marker_path(dir)))
        .find(|(_, path)| path.is_file())
}

/// Check whether `dir` contains either marker binary
pub fn is_marker_dir(dir: &Path) -> bool {
    locate_marker(dir).is_some()
}

/// Find the backup sidecar in `dir`, 32-bit first.
pub fn locate_backup(dir: &Path) -> Option<(Arch, PathBuf)> {
    Arch::iter()
        .map(|arch| (arch, arch.backup_path(dir)))
        .find(|(_, path)| path.is_file())
}

/// Compare a file name component against a literal directory name.
pub(crate) fn has_name(path: &Path, name: &str) -> bool {
    path.file_name().is_some_and(|n| n == name)
}
