//! File system values and the capability surface the engines consume.
//!
//! The dispatch engines never see a whole file system; they receive exactly
//! the existence and rename capabilities below, by reference. That keeps
//! their dependency surface minimal and mockable.

mod native;
mod relative;

pub use native::NativeFs;
pub use relative::RelativeFs;

use std::io;
use std::path::Path;

/// Overwrite semantics, fixed at file-system-value construction time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// A destination clash is replaced.
    Overwrite,
    /// A destination clash is rejected.
    #[default]
    Tentative,
}

/// Existence and type queries. A directory is not a file and vice versa;
/// "does not exist" answers false to both.
pub trait ExistsIn {
    /// Does a file exist at the path specified.
    fn file_exists(&self, name: &str) -> bool;

    /// Does a directory exist at the path specified.
    fn directory_exists(&self, name: &str) -> bool;
}

/// The single rename primitive. Both paths arrive already resolved against
/// the owning value's root; errors pass through to the caller untouched.
pub trait RenameAt {
    fn rename_resolved(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// How a path should be ensured to exist; see [`RelativeFs::ensure`] and
/// [`NativeFs::ensure`].
#[derive(Clone, Copy, Debug)]
pub struct PathAs<'a> {
    /// The path to ensure.
    pub name: &'a str,
    /// Fallback file name used when `name` denotes a directory.
    pub default: &'a str,
    /// Interpret `name` as a file rather than a directory.
    pub as_file: bool,
}

/// Shape check for names entering the root-relative space: `"."` or
/// '/'-separated non-empty segments, none of them `.` or `..`, with no
/// leading or trailing separator.
pub(crate) fn valid_path(name: &str) -> bool {
    if name == "." {
        return true;
    }

    if name.is_empty() {
        return false;
    }

    name.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
