//! Emulator configuration files written alongside a patched binary.
//!
//! Every file here is created only if absent. Existing configuration is
//! never overwritten, and unpatch leaves all of it in place.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::{IoResultExt, Result};
use crate::layout::{APP_ID_FILE, SETTINGS_DIR, SETTINGS_FLAGS};

/// Contents of each flag file in the settings directory
const FLAG_ENABLED: &str = "1";

/// Create `path` with `contents` unless it already exists.
///
/// Returns whether the file was created.
pub(crate) fn write_if_absent(path: &Path, contents: &[u8]) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e).at(path),
    };
    file.write_all(contents).at(path)?;
    Ok(true)
}

/// Ensure `<dir>/steam_appid.txt` exists, writing `app_id` if it does not
pub fn ensure_app_id_file(dir: &Path, app_id: &str) -> Result<bool> {
    let path = dir.join(APP_ID_FILE);
    let created = write_if_absent(&path, app_id.as_bytes())?;
    if created {
        info!("Created {}", path.display());
    }
    Ok(created)
}

/// Ensure `<dir>/steam_settings` exists.
///
/// A newly created directory is populated with the app id and the offline,
/// overlay and networking flags. An existing directory is left untouched,
/// even if some of those files are missing from it.
pub fn ensure_settings_dir(dir: &Path, app_id: &str) -> Result<bool> {
    let settings = dir.join(SETTINGS_DIR);
    match fs::create_dir(&settings) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e).at(&settings),
    }

    let app_id_path = settings.join(APP_ID_FILE);
    fs::write(&app_id_path, app_id).at(&app_id_path)?;
    for flag in SETTINGS_FLAGS {
        let path = settings.join(flag);
        fs::write(&path, FLAG_ENABLED).at(&path)?;
    }

    info!("Created {}", settings.display());
    Ok(true)
}
