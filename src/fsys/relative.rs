//! The sandboxed, root-relative file system value.
//!
//! A value is rooted at an absolute native path; every operation takes a
//! virtual, '/'-separated name which is resolved against that root. Names
//! are validated on entry; the virtual space never leaks the platform
//! separator.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use crate::calc::{PathCalc, RelativeCalc};
use crate::errors::FsOpError;
use crate::ops::{Changer, Mover};

use super::{ExistsIn, PathAs, Policy, RenameAt, valid_path};

/// A file system sandboxed at a fixed root, with path-aware move and
/// change operations plus the surrounding read/write surface.
///
/// The overwrite policy is fixed at construction and cannot change for
/// the lifetime of the value.
pub struct RelativeFs {
    root: String,
    policy: Policy,
    calc: RelativeCalc,
    mover: OnceLock<Mover>,
    changer: OnceLock<Changer>,
}

impl RelativeFs {
    /// Creates a value rooted at `root`. The root is canonicalized when it
    /// resolves; otherwise it is kept as given.
    pub fn new(root: impl Into<String>, policy: Policy) -> Self {
        let given = root.into();
        let root = dunce::canonicalize(&given)
            .map(|canonical| canonical.to_string_lossy().into_owned())
            .unwrap_or(given);

        Self {
            calc: RelativeCalc::new(root.clone()),
            root,
            policy,
            mover: OnceLock::new(),
            changer: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn calc(&self) -> &dyn PathCalc {
        &self.calc
    }

    /// Maps a virtual name into the underlying file system.
    fn resolve(&self, name: &str) -> PathBuf {
        PathBuf::from(self.calc.join(&[&self.root, name]))
    }

    fn validated(&self, name: &str, op: &'static str) -> Result<(), FsOpError> {
        if valid_path(name) {
            return Ok(());
        }

        Err(FsOpError::invalid_path(
            format!("{op} requires an unrooted '/'-separated name"),
            name,
        ))
    }

    /// Relocates `from` to a new parent, optionally renaming it in the
    /// same step. A destination sharing the source's parent is rejected;
    /// that is a rename and belongs to [`RelativeFs::change_item`].
    pub fn move_item(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.mover
            .get_or_init(|| Mover::new(&self.root, self.policy))
            .move_item(self, &self.calc, from, to)
    }

    /// Renames `to` (a bare name, no separators) within `from`'s parent
    /// directory.
    pub fn change_item(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.changer
            .get_or_init(|| Changer::new(&self.root, self.policy))
            .change_item(self, &self.calc, from, to)
    }

    /// Copy is deliberately unsupported; the rejection is part of the
    /// contract, not a gap to fill.
    pub fn copy(&self, _from: &str, _to: &str) -> Result<(), FsOpError> {
        Err(FsOpError::Unsupported { op: "Copy" })
    }

    /// Creates or truncates the named file. Under tentative policy an
    /// existing file is rejected rather than truncated; the decision sits
    /// with the value, not the call site, to stay shaped like the standard
    /// library's `create`.
    pub fn create(&self, name: &str) -> Result<File, FsOpError> {
        self.validated(name, "Create")?;

        if self.policy == Policy::Tentative && self.file_exists(name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{name}' already exists"),
            )
            .into());
        }

        File::create(self.resolve(name)).map_err(Into::into)
    }

    /// Writes `data` to the named file, creating it if necessary.
    pub fn write_file(&self, name: &str, data: &[u8]) -> Result<(), FsOpError> {
        self.validated(name, "WriteFile")?;
        fs::write(self.resolve(name), data).map_err(Into::into)
    }

    /// Reads the named file and returns its contents.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, FsOpError> {
        self.validated(name, "ReadFile")?;
        fs::read(self.resolve(name)).map_err(Into::into)
    }

    /// Creates the named directory; an existing directory is a no-op.
    pub fn make_dir(&self, name: &str) -> Result<(), FsOpError> {
        self.validated(name, "MakeDir")?;

        if self.directory_exists(name) {
            return Ok(());
        }

        fs::create_dir(self.resolve(name)).map_err(Into::into)
    }

    /// Creates the named directory along with any missing parents; an
    /// existing directory is a no-op.
    pub fn make_dir_all(&self, name: &str) -> Result<(), FsOpError> {
        self.validated(name, "MakeDirAll")?;

        if self.directory_exists(name) {
            return Ok(());
        }

        fs::create_dir_all(self.resolve(name)).map_err(Into::into)
    }

    /// Removes the named file or empty directory.
    pub fn remove(&self, name: &str) -> Result<(), FsOpError> {
        self.validated(name, "Remove")?;

        let path = self.resolve(&self.calc.clean(name));
        if self.directory_exists(name) {
            return fs::remove_dir(path).map_err(Into::into);
        }

        fs::remove_file(path).map_err(Into::into)
    }

    /// Removes the named path and any children it contains; a missing
    /// path is not an error.
    pub fn remove_all(&self, name: &str) -> Result<(), FsOpError> {
        self.validated(name, "RemoveAll")?;

        match fs::remove_dir_all(self.resolve(&self.calc.clean(name))) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            outcome => outcome.map_err(Into::into),
        }
    }

    /// The raw rename primitive, resolved against the root. No probing,
    /// no policy; underlying errors pass through.
    pub fn rename(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.rename_resolved(&self.resolve(from), &self.resolve(to))
            .map_err(Into::into)
    }

    /// Reads the named directory, entries sorted by file name.
    pub fn read_dir(&self, name: &str) -> Result<Vec<fs::DirEntry>, FsOpError> {
        self.validated(name, "ReadDir")?;

        let mut entries = fs::read_dir(self.resolve(name))?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());
        Ok(entries)
    }

    /// Makes sure a path exists at a particular location and answers the
    /// effective file name.
    ///
    /// When `as.name` already exists as a file, its base name is returned;
    /// when it exists as a directory, the default is returned. Otherwise
    /// the file interpretation creates the parent directory and returns
    /// the base, and the directory interpretation creates the whole path
    /// and returns the default.
    pub fn ensure(&self, as_: PathAs<'_>) -> Result<String, FsOpError> {
        self.validated(as_.name, "Ensure")?;

        if self.file_exists(as_.name) {
            let (_, file) = self.calc.split(as_.name);
            return Ok(file.to_string());
        }

        if self.directory_exists(as_.name) {
            return Ok(as_.default.to_string());
        }

        if as_.as_file {
            let (directory, file) = self.calc.split(as_.name);
            if !directory.is_empty() {
                self.make_dir_all(directory)?;
            }

            return Ok(file.to_string());
        }

        self.make_dir_all(as_.name)?;
        Ok(as_.default.to_string())
    }
}

impl ExistsIn for RelativeFs {
    fn file_exists(&self, name: &str) -> bool {
        fs::metadata(self.resolve(name))
            .map(|info| info.is_file())
            .unwrap_or(false)
    }

    fn directory_exists(&self, name: &str) -> bool {
        fs::metadata(self.resolve(name))
            .map(|info| info.is_dir())
            .unwrap_or(false)
    }
}

impl RenameAt for RelativeFs {
    fn rename_resolved(&self, from: &Path, to: &Path) -> io::Result<()> {
        debug!(from = %from.display(), to = %to.display(), "rename primitive");
        fs::rename(from, to)
    }
}
