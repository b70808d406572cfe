use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::layout::Arch;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot find appid for {} - create steam_appid.txt with the proper id", .0.display())]
    MissingAppId(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Replacement binary for {arch} not found in {}", dir.display())]
    PayloadNotFound { arch: Arch, dir: PathBuf },

    #[error("Replacement binary for {0} is empty")]
    EmptyPayload(Arch),

    #[error("Failed to decompress replacement binary for {arch}: {source}")]
    PayloadDecompress {
        arch: Arch,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Attaches the offending path to a raw `io::Result`.
pub(crate) trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::io("steam_api.dll", io_err);
        assert!(err.is_not_found());

        let other_io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::io("steam_api.dll", other_io_err);
        assert!(!err2.is_not_found());

        assert!(!Error::EmptyPayload(Arch::X86).is_not_found());
    }

    #[test]
    fn test_io_error_names_path() {
        let err: Result<()> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")).at("Game/steam_api.dll");
        let message = err.unwrap_err().to_string();
        assert!(message.contains("steam_api.dll"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_missing_app_id_message() {
        let err = Error::MissingAppId(PathBuf::from("common/Game"));
        assert!(err.to_string().contains("steam_appid.txt"));
    }
}
