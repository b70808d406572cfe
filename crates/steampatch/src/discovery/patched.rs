use std::fs;
use std::path::Path;

use super::Lookup;
use crate::layout::locate_marker;
use crate::payload::ReplacementPayload;

/// Check whether the marker binary in `dir` is the replacement payload.
///
/// Any I/O error reads as "not patched".
pub fn compute_is_patched(dir: &Path, payload: &ReplacementPayload) -> bool {
    matches!(lookup_is_patched(dir, payload), Lookup::Found(true))
}

/// Byte-compare the marker binary in `dir` against the payload.
///
/// [`Lookup::Absent`] means the directory has no marker binary at all.
pub fn lookup_is_patched(dir: &Path, payload: &ReplacementPayload) -> Lookup<bool> {
    let Some((arch, marker)) = locate_marker(dir) else {
        return Lookup::Absent;
    };
    let expected = payload.for_arch(arch);

    let result = fs::metadata(&marker).and_then(|meta| {
        if meta.len() != expected.len() as u64 {
            return Ok(Some(false));
        }
        fs::read(&marker).map(|bytes| Some(bytes == expected))
    });
    Lookup::from_io(result)
}
