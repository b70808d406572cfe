use std::path::{Path, PathBuf};

use crate::layout::{COMMON_DIR, has_name};

/// Find the install root for a marker directory.
///
/// Steam keeps every title in its own folder under `steamapps/common`, so the
/// install root is the ancestor (or self) whose parent is named `common`.
/// When no such ancestor exists the marker directory itself is returned.
pub fn resolve_install_root(marker_dir: &Path) -> PathBuf {
    let mut current = marker_dir;
    while let Some(parent) = current.parent() {
        if has_name(parent, COMMON_DIR) {
            return current.to_path_buf();
        }
        current = parent;
    }
    marker_dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_binary_dir() {
        let marker = Path::new("/lib/steamapps/common/Game/bin/win64");
        assert_eq!(
            resolve_install_root(marker),
            PathBuf::from("/lib/steamapps/common/Game")
        );
    }

    #[test]
    fn test_marker_in_install_root() {
        let marker = Path::new("/lib/steamapps/common/Game");
        assert_eq!(resolve_install_root(marker), marker);
    }

    #[test]
    fn test_no_common_ancestor() {
        let marker = Path::new("/games/Other/Game/bin");
        assert_eq!(resolve_install_root(marker), marker);
    }

    #[test]
    fn test_nearest_common_wins() {
        let marker = Path::new("/common/Outer/common/Inner/bin");
        assert_eq!(
            resolve_install_root(marker),
            PathBuf::from("/common/Outer/common/Inner")
        );
    }

    #[test]
    fn test_relative_path() {
        let marker = Path::new("common/Game/bin");
        assert_eq!(resolve_install_root(marker), PathBuf::from("common/Game"));
    }
}
