//! Directory tree walk.
//!
//! Built on [`WalkDir`], which keeps its own stack of open directories, so deep
//! trees cannot exhaust the call stack. Directory links are followed; a link
//! pointing back at one of its ancestors is reported as a loop and skipped.
//!
//! Eligibility is decided per directory: a directory is eligible if the
//! search root is anchored, or if any component between the root and the
//! directory (itself included) is named `steamapps`.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::InstallationRecord;
use crate::layout::{STEAMAPPS_DIR, has_name, is_marker_dir};
use crate::payload::ReplacementPayload;

/// A directory the walk could not enter
#[derive(Debug)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Result of a scan: the installations found plus every skipped subtree
#[derive(Debug, Default)]
pub struct ScanReport {
    pub records: Vec<InstallationRecord>,
    pub skipped: Vec<SkippedDir>,
}

/// Find every installation below `root`.
///
/// Unless `include_unanchored` is set, only directories at or below a
/// `steamapps` folder are considered; a `root` that already sits inside a
/// `steamapps` tree counts as anchored. Errors are swallowed per subtree.
pub fn find_installations(
    root: &Path,
    include_unanchored: bool,
    payload: &ReplacementPayload,
) -> Vec<InstallationRecord> {
    scan(root, include_unanchored, payload).records
}

/// Like [`find_installations`], also reporting the subtrees that were skipped.
pub fn scan(root: &Path, include_unanchored: bool, payload: &ReplacementPayload) -> ScanReport {
    let root = normalize(root);
    let anchored = include_unanchored || root.ancestors().any(|a| has_name(a, STEAMAPPS_DIR));
    debug!(
        "Scanning {} (anchored: {}, include unanchored: {})",
        root.display(),
        anchored,
        include_unanchored
    );

    let mut report = ScanReport::default();
    let mut entries = WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                let error = io::Error::from(e);
                debug!("Skipping {}: {}", path.display(), error);
                report.skipped.push(SkippedDir { path, error });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if (anchored || below_steamapps(&root, dir)) && is_marker_dir(dir) {
            debug!("Found installation at {}", dir.display());
            report
                .records
                .push(InstallationRecord::inspect(entry.into_path(), payload));
            // An installation directory is a leaf: markers nested inside it
            // (bundled redistributables and the like) are not separate installs.
            entries.skip_current_dir();
        }
    }

    report
}

/// Whether a component of `dir` below `root` is named `steamapps`
fn below_steamapps(root: &Path, dir: &Path) -> bool {
    dir.strip_prefix(root)
        .is_ok_and(|rel| rel.components().any(|c| c.as_os_str() == STEAMAPPS_DIR))
}

/// Absolute form of `path` with `.` and `..` folded lexically.
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn payload() -> ReplacementPayload {
        ReplacementPayload::new(b"emu32".to_vec(), b"emu64".to_vec()).unwrap()
    }

    fn install(dir: &Path, marker: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(marker), b"vendor").unwrap();
    }

    fn scan_paths(root: &Path, include_unanchored: bool) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = find_installations(root, include_unanchored, &payload())
            .into_iter()
            .map(|r| r.scan_path().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_anchored_tree() {
        let temp = TempDir::new().unwrap();
        let game = temp.path().join("steamapps").join("common").join("Game");
        install(&game, "steam_api.dll");

        assert_eq!(scan_paths(temp.path(), false), vec![game]);
    }

    #[test]
    fn test_unanchored_tree_needs_flag() {
        let temp = TempDir::new().unwrap();
        let game = temp.path().join("Other").join("Game");
        install(&game, "steam_api64.dll");

        assert!(scan_paths(temp.path(), false).is_empty());
        assert_eq!(scan_paths(temp.path(), true), vec![game]);
    }

    #[test]
    fn test_root_inside_steamapps_is_anchored() {
        let temp = TempDir::new().unwrap();
        let common = temp.path().join("steamapps").join("common");
        let game = common.join("Game");
        install(&game, "steam_api.dll");

        assert_eq!(scan_paths(&common, false), vec![game]);
    }

    #[test]
    fn test_eligibility_is_per_branch() {
        let temp = TempDir::new().unwrap();
        let anchored = temp
            .path()
            .join("Library")
            .join("steamapps")
            .join("common")
            .join("A");
        let stray = temp.path().join("Downloads").join("B");
        install(&anchored, "steam_api.dll");
        install(&stray, "steam_api.dll");

        assert_eq!(scan_paths(temp.path(), false), vec![anchored]);
    }

    #[test]
    fn test_installation_is_leaf() {
        let temp = TempDir::new().unwrap();
        let game = temp.path().join("steamapps").join("common").join("Game");
        install(&game, "steam_api.dll");
        install(&game.join("redist"), "steam_api64.dll");

        assert_eq!(scan_paths(temp.path(), false), vec![game]);
    }

    #[test]
    fn test_multiple_installations() {
        let temp = TempDir::new().unwrap();
        let common = temp.path().join("steamapps").join("common");
        let a = common.join("A");
        let b = common.join("B").join("bin");
        install(&a, "steam_api.dll");
        install(&b, "steam_api64.dll");
        fs::create_dir_all(common.join("C")).unwrap();

        assert_eq!(scan_paths(temp.path(), false), vec![a, b]);
    }

    #[test]
    fn test_steamapps_file_does_not_anchor() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("steamapps"), b"").unwrap();
        install(&temp.path().join("Game"), "steam_api.dll");

        assert!(scan_paths(temp.path(), false).is_empty());
    }

    #[test]
    fn test_missing_root_is_reported() {
        let temp = TempDir::new().unwrap();
        let report = scan(&temp.path().join("nope"), true, &payload());
        assert!(report.records.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].error.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_terminates() {
        let temp = TempDir::new().unwrap();
        let game = temp.path().join("steamapps").join("common").join("Game");
        install(&game, "steam_api.dll");
        std::os::unix::fs::symlink(temp.path(), temp.path().join("steamapps").join("loop"))
            .unwrap();

        assert_eq!(scan_paths(temp.path(), false), vec![game]);

        let report = scan(temp.path(), false, &payload());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            report.skipped[0].path,
            normalize(&temp.path().join("steamapps").join("loop"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_game_dir_is_followed() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("elsewhere").join("Game");
        install(&real, "steam_api.dll");
        let common = temp.path().join("lib").join("steamapps").join("common");
        fs::create_dir_all(&common).unwrap();
        std::os::unix::fs::symlink(&real, common.join("Game")).unwrap();

        let found = scan_paths(&temp.path().join("lib"), false);
        assert_eq!(found, vec![normalize(&common.join("Game"))]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_library_root_is_followed() {
        let temp = TempDir::new().unwrap();
        let game = temp
            .path()
            .join("share")
            .join("Steam")
            .join("steamapps")
            .join("common")
            .join("Game");
        install(&game, "steam_api64.dll");
        let dot_steam = temp.path().join("dot-steam");
        fs::create_dir(&dot_steam).unwrap();
        std::os::unix::fs::symlink(temp.path().join("share").join("Steam"), dot_steam.join("steam"))
            .unwrap();

        let found = scan_paths(&dot_steam, false);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("dot-steam/steam/steamapps/common/Game"));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_link_does_not_stop_siblings() {
        let temp = TempDir::new().unwrap();
        let common = temp.path().join("steamapps").join("common");
        let a = common.join("A");
        let c = common.join("C");
        install(&a, "steam_api.dll");
        install(&c, "steam_api.dll");
        std::os::unix::fs::symlink(temp.path().join("missing"), common.join("B")).unwrap();

        let report = scan(temp.path(), false, &payload());
        let mut found: Vec<PathBuf> = report
            .records
            .iter()
            .map(|r| r.scan_path().to_path_buf())
            .collect();
        found.sort();
        assert_eq!(found, vec![normalize(&a), normalize(&c)]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, normalize(&common.join("B")));
        assert_eq!(report.skipped[0].error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_parent_components_are_folded_before_anchoring() {
        let temp = TempDir::new().unwrap();
        let steamapps = temp.path().join("lib").join("steamapps");
        fs::create_dir_all(&steamapps).unwrap();
        install(&temp.path().join("lib").join("Stray"), "steam_api.dll");

        assert!(scan_paths(&steamapps.join(".."), false).is_empty());
        assert_eq!(
            normalize(&steamapps.join("..").join(".")),
            normalize(&temp.path().join("lib"))
        );
    }
}
