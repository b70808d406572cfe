//! Application id resolution.
//!
//! Sources, first non-empty wins:
//!
//! 1. `<dir>/steam_appid.txt`
//! 2. `<dir>/steam_settings/steam_appid.txt`
//! 3. `appmanifest_<id>.acf` in the Steam library (two levels above the
//!    install root) that mentions the quoted install root folder name

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::Lookup;
use super::install_root::resolve_install_root;
use crate::layout::{APP_ID_FILE, SETTINGS_DIR};

static MANIFEST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^appmanifest_([0-9]+)\.acf$").expect("manifest pattern is valid")
});

/// Resolve the application id of an installation, best-effort.
///
/// Never fails: unreadable sources are skipped and an unresolvable id is `None`.
pub fn resolve_application_id(marker_dir: &Path) -> Option<String> {
    lookup_application_id(marker_dir).found()
}

/// Resolve the application id, keeping the first I/O error for diagnostics.
///
/// Returns [`Lookup::Failed`] only when no source produced an id and at least
/// one of them could not be read.
pub fn lookup_application_id(marker_dir: &Path) -> Lookup<String> {
    let mut failure = None;

    let id_files = [
        marker_dir.join(APP_ID_FILE),
        marker_dir.join(SETTINGS_DIR).join(APP_ID_FILE),
    ];
    for path in &id_files {
        match Lookup::from_io(read_id_file(path)) {
            Lookup::Found(id) => return Lookup::Found(id),
            Lookup::Absent => {}
            Lookup::Failed(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                failure.get_or_insert(e);
            }
        }
    }

    let install_root = resolve_install_root(marker_dir);
    match lookup_manifest_id(&install_root) {
        Lookup::Found(id) => Lookup::Found(id),
        Lookup::Absent => failure.map_or(Lookup::Absent, Lookup::Failed),
        Lookup::Failed(e) => Lookup::Failed(failure.unwrap_or(e)),
    }
}

fn read_id_file(path: &Path) -> io::Result<Option<String>> {
    let bytes = fs::read(path)?;
    let id = decode_text(&bytes).trim().to_string();
    Ok((!id.is_empty()).then_some(id))
}

/// Decode a text file as UTF-8, honouring a UTF-8 or UTF-16 byte order mark.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    text
}

/// Search the library's app manifests for one naming `install_root`.
fn lookup_manifest_id(install_root: &Path) -> Lookup<String> {
    let Some(library) = install_root.parent().and_then(Path::parent) else {
        return Lookup::Absent;
    };
    let Some(folder) = install_root.file_name() else {
        return Lookup::Absent;
    };
    let needle = format!("\"{}\"", folder.to_string_lossy());

    let manifests = match list_manifests(library) {
        Ok(m) => m,
        Err(e) => {
            debug!("Failed to list manifests in {}: {}", library.display(), e);
            return Lookup::from_io(Err(e));
        }
    };

    let mut failure = None;
    for (id, path) in manifests {
        match fs::read(&path) {
            Ok(bytes) => {
                if decode_text(&bytes).contains(&needle) {
                    debug!("App id {} resolved from {}", id, path.display());
                    return Lookup::Found(id);
                }
            }
            Err(e) => {
                debug!("Failed to read manifest {}: {}", path.display(), e);
                failure.get_or_insert(e);
            }
        }
    }

    failure.map_or(Lookup::Absent, Lookup::Failed)
}

/// Manifest files in `library` as `(id, path)`, sorted by file name
fn list_manifests(library: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(library)?.map(|entry| entry.map(|e| e.path()));
    Ok(select_manifests(library, entries))
}

/// Keep the manifest paths among `entries`, dropping unreadable entries.
fn select_manifests(
    library: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Vec<(String, PathBuf)> {
    let mut manifests = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                debug!("Skipping entry in {}: {}", library.display(), e);
                continue;
            }
        };
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if let Some(caps) = MANIFEST_NAME.captures(&name) {
            let id = caps[1].to_string();
            manifests.push((name, id, path));
        }
    }
    manifests.sort();
    manifests
        .into_iter()
        .map(|(_, id, path)| (id, path))
        .collect()
}
