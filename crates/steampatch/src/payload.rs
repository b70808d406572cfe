//! Replacement binaries substituted for the vendor DLLs.
//!
//! The payload is loaded once before any scan begins and is only ever read
//! afterwards; discovery compares against it and patch writes it out.

use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{Error, IoResultExt, Result};
use crate::layout::Arch;

/// Extension of the compressed payload files
const GZIP_EXTENSION: &str = ".gz";

/// Immutable 32-bit and 64-bit replacement binaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPayload {
    x86: Vec<u8>,
    x64: Vec<u8>,
}

impl ReplacementPayload {
    /// Build a payload from raw buffers.
    ///
    /// Empty buffers are rejected: an empty replacement would compare equal
    /// to every zero-length marker and make it look patched.
    pub fn new(x86: Vec<u8>, x64: Vec<u8>) -> Result<Self> {
        if x86.is_empty() {
            return Err(Error::EmptyPayload(Arch::X86));
        }
        if x64.is_empty() {
            return Err(Error::EmptyPayload(Arch::X64));
        }
        Ok(Self { x86, x64 })
    }

    /// Build a payload from gzip-compressed buffers
    pub fn from_gzip(x86_gz: &[u8], x64_gz: &[u8]) -> Result<Self> {
        Self::new(gunzip(Arch::X86, x86_gz)?, gunzip(Arch::X64, x64_gz)?)
    }

    /// Load both binaries from a directory.
    ///
    /// For each architecture the plain marker name is tried first
    /// (`steam_api.dll`), then its gzip form (`steam_api.dll.gz`).
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::new(load_one(dir, Arch::X86)?, load_one(dir, Arch::X64)?)
    }

    /// Replacement bytes for the given architecture
    pub fn for_arch(&self, arch: Arch) -> &[u8] {
        match arch {
            Arch::X86 => &self.x86,
            Arch::X64 => &self.x64,
        }
    }

    /// Check whether `bytes` are exactly the replacement for `arch`
    pub fn matches(&self, arch: Arch, bytes: &[u8]) -> bool {
        self.for_arch(arch) == bytes
    }
}

fn load_one(dir: &Path, arch: Arch) -> Result<Vec<u8>> {
    let plain = arch.marker_path(dir);
    if plain.is_file() {
        debug!("Loading {} payload from {}", arch, plain.display());
        return fs::read(&plain).at(&plain);
    }

    let compressed = dir.join(format!("{}{}", arch.marker_name(), GZIP_EXTENSION));
    if compressed.is_file() {
        debug!("Loading {} payload from {}", arch, compressed.display());
        let data = fs::read(&compressed).at(&compressed)?;
        return gunzip(arch, &data);
    }

    Err(Error::PayloadNotFound {
        arch,
        dir: dir.to_path_buf(),
    })
}

fn gunzip(arch: Arch, data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    GzDecoder::new(data)
        .read_to_end(&mut output)
        .map_err(|source| Error::PayloadDecompress { arch, source })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            ReplacementPayload::new(Vec::new(), b"x64".to_vec()),
            Err(Error::EmptyPayload(Arch::X86))
        ));
        assert!(matches!(
            ReplacementPayload::new(b"x86".to_vec(), Vec::new()),
            Err(Error::EmptyPayload(Arch::X64))
        ));
    }

    #[test]
    fn test_for_arch_and_matches() {
        let payload = ReplacementPayload::new(b"emu32".to_vec(), b"emu64".to_vec()).unwrap();
        assert_eq!(payload.for_arch(Arch::X86), b"emu32");
        assert_eq!(payload.for_arch(Arch::X64), b"emu64");
        assert!(payload.matches(Arch::X64, b"emu64"));
        assert!(!payload.matches(Arch::X86, b"emu64"));
    }

    #[test]
    fn test_from_gzip() {
        let payload = ReplacementPayload::from_gzip(&gzip(b"emu32"), &gzip(b"emu64")).unwrap();
        assert_eq!(payload.for_arch(Arch::X86), b"emu32");
        assert_eq!(payload.for_arch(Arch::X64), b"emu64");
    }

    #[test]
    fn test_from_gzip_rejects_garbage() {
        let err = ReplacementPayload::from_gzip(b"not gzip", &gzip(b"emu64")).unwrap_err();
        assert!(matches!(err, Error::PayloadDecompress { arch: Arch::X86, .. }));
    }

    #[test]
    fn test_load_dir_mixed_forms() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("steam_api.dll"), b"emu32").unwrap();
        fs::write(dir.path().join("steam_api64.dll.gz"), gzip(b"emu64")).unwrap();

        let payload = ReplacementPayload::load_dir(dir.path()).unwrap();
        assert_eq!(payload.for_arch(Arch::X86), b"emu32");
        assert_eq!(payload.for_arch(Arch::X64), b"emu64");
    }

    #[test]
    fn test_load_dir_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("steam_api.dll"), b"emu32").unwrap();

        let err = ReplacementPayload::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::PayloadNotFound { arch: Arch::X64, .. }));
    }
}
