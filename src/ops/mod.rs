//! Operation dispatch machinery shared by the move and change engines.
//!
//! Both engines work the same way: probe the existence and type of the
//! source and a computed destination, form a four-boolean mask, and look
//! the mask up in a fixed sixteen-slot table whose unpopulated slots hold
//! an explicit reject action. One table exists per (engine kind, policy)
//! pair; the owning file system value builds it at most once.

mod changer;
mod mover;

pub(crate) use changer::Changer;
pub(crate) use mover::Mover;

use crate::fsys::ExistsIn;

/// The four-boolean classification of a probed source/destination pair,
/// used only as a dispatch key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OpMask {
    pub(crate) from_exists: bool,
    pub(crate) to_exists: bool,
    pub(crate) from_is_dir: bool,
    pub(crate) to_is_dir: bool,
}

impl OpMask {
    pub(crate) const SLOTS: usize = 16;

    pub(crate) const fn new(
        from_exists: bool,
        to_exists: bool,
        from_is_dir: bool,
        to_is_dir: bool,
    ) -> Self {
        Self {
            from_exists,
            to_exists,
            from_is_dir,
            to_is_dir,
        }
    }

    /// Encodes the mask as a table index; the full domain is sixteen
    /// values, of which each engine populates four or five.
    pub(crate) const fn index(self) -> usize {
        self.from_exists as usize
            | (self.to_exists as usize) << 1
            | (self.from_is_dir as usize) << 2
            | (self.to_is_dir as usize) << 3
    }
}

/// Fresh existence/type probe, never cached: probing happens immediately
/// before an action executes, and staleness between the two is an accepted
/// race at the file-system level. A directory takes precedence over a file.
pub(crate) fn peek<F>(fs: &F, name: &str) -> (bool, bool)
where
    F: ExistsIn + ?Sized,
{
    if fs.directory_exists(name) {
        return (true, true);
    }

    if fs.file_exists(name) {
        return (true, false);
    }

    (false, false)
}

/// Probes both operands of a binary operation into a dispatch key.
pub(crate) fn query<F>(fs: &F, from: &str, to: &str) -> OpMask
where
    F: ExistsIn + ?Sized,
{
    let (from_exists, from_is_dir) = peek(fs, from);
    let (to_exists, to_is_dir) = peek(fs, to);

    OpMask::new(from_exists, to_exists, from_is_dir, to_is_dir)
}

#[cfg(test)]
pub(crate) mod harness {
    //! A tiny in-memory file system for exercising the engines without
    //! touching local storage.

    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::io;
    use std::path::{Path, PathBuf};

    use crate::fsys::{ExistsIn, RenameAt};

    #[derive(Default)]
    pub(crate) struct MemFs {
        pub(crate) files: BTreeSet<String>,
        pub(crate) dirs: BTreeSet<String>,
        pub(crate) renames: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl MemFs {
        pub(crate) fn with(files: &[&str], dirs: &[&str]) -> Self {
            Self {
                files: files.iter().map(|f| f.to_string()).collect(),
                dirs: dirs.iter().map(|d| d.to_string()).collect(),
                renames: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn rename_count(&self) -> usize {
            self.renames.borrow().len()
        }
    }

    impl ExistsIn for MemFs {
        fn file_exists(&self, name: &str) -> bool {
            self.files.contains(name)
        }

        fn directory_exists(&self, name: &str) -> bool {
            self.dirs.contains(name)
        }
    }

    impl RenameAt for MemFs {
        fn rename_resolved(&self, from: &Path, to: &Path) -> io::Result<()> {
            self.renames
                .borrow_mut()
                .push((from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }
    }
}
