//! Path resolution helpers that sit outside the sandboxed space.

use std::fs;
use std::path::{self, Path, PathBuf};

/// Resolves a home reference (`~`) to the user's home directory, and a
/// relative path to an absolute one. Resolution is best-effort: when the
/// home directory or current directory cannot be determined, the path is
/// returned as given.
pub fn resolve_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(path::is_separator));
        }

        return PathBuf::from(path);
    }

    path::absolute(path).unwrap_or_else(|_| PathBuf::from(path))
}

/// Partitions directory entries into (files, directories). Entries whose
/// type cannot be determined are grouped with the files.
pub fn separate(entries: Vec<fs::DirEntry>) -> (Vec<fs::DirEntry>, Vec<fs::DirEntry>) {
    entries.into_iter().partition(|entry| {
        entry
            .file_type()
            .map(|kind| !kind.is_dir())
            .unwrap_or(true)
    })
}

/// True when `candidate` refers to `base` itself once both are
/// canonicalized; used to refuse operations against a value's own root.
pub fn is_same_location(base: &Path, candidate: &Path) -> bool {
    let base_real = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
    let candidate_real = dunce::canonicalize(candidate).unwrap_or_else(|_| candidate.to_path_buf());

    base_real == candidate_real
}
