//! The native-absolute file system value: thin passthroughs to local
//! storage, plus the same dispatch engines the sandboxed value uses.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use crate::calc::{NativeCalc, PathCalc};
use crate::errors::FsOpError;
use crate::ops::{Changer, Mover};

use super::{ExistsIn, PathAs, Policy, RenameAt};

/// A file system value over native-absolute paths. It carries no root of
/// its own; paths mean exactly what the platform says they mean.
pub struct NativeFs {
    policy: Policy,
    calc: NativeCalc,
    mover: OnceLock<Mover>,
    changer: OnceLock<Changer>,
}

impl NativeFs {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            calc: NativeCalc,
            mover: OnceLock::new(),
            changer: OnceLock::new(),
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn calc(&self) -> &dyn PathCalc {
        &self.calc
    }

    /// Relocates `from` to a new parent, optionally renaming it in the
    /// same step; same-parent destinations are rejected in favor of
    /// [`NativeFs::change_item`].
    pub fn move_item(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.mover
            .get_or_init(|| Mover::new(PathBuf::new(), self.policy))
            .move_item(self, &self.calc, from, to)
    }

    /// Renames `to` (a bare name, no separators) within `from`'s parent
    /// directory.
    pub fn change_item(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.changer
            .get_or_init(|| Changer::new(PathBuf::new(), self.policy))
            .change_item(self, &self.calc, from, to)
    }

    /// Copy is deliberately unsupported; the rejection is part of the
    /// contract, not a gap to fill.
    pub fn copy(&self, _from: &str, _to: &str) -> Result<(), FsOpError> {
        Err(FsOpError::Unsupported { op: "Copy" })
    }

    /// Creates or truncates the named file; under tentative policy an
    /// existing file is rejected rather than truncated.
    pub fn create(&self, name: &str) -> Result<File, FsOpError> {
        if self.policy == Policy::Tentative && self.file_exists(name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{name}' already exists"),
            )
            .into());
        }

        File::create(name).map_err(Into::into)
    }

    pub fn write_file(&self, name: &str, data: &[u8]) -> Result<(), FsOpError> {
        fs::write(name, data).map_err(Into::into)
    }

    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, FsOpError> {
        fs::read(name).map_err(Into::into)
    }

    /// Creates the named directory; an existing directory is a no-op.
    pub fn make_dir(&self, name: &str) -> Result<(), FsOpError> {
        if self.directory_exists(name) {
            return Ok(());
        }

        fs::create_dir(name).map_err(Into::into)
    }

    /// Creates the named directory along with any missing parents.
    pub fn make_dir_all(&self, name: &str) -> Result<(), FsOpError> {
        fs::create_dir_all(name).map_err(Into::into)
    }

    /// Removes the named file or empty directory.
    pub fn remove(&self, name: &str) -> Result<(), FsOpError> {
        if self.directory_exists(name) {
            return fs::remove_dir(name).map_err(Into::into);
        }

        fs::remove_file(name).map_err(Into::into)
    }

    /// Removes the named path and any children; a missing path is not an
    /// error.
    pub fn remove_all(&self, name: &str) -> Result<(), FsOpError> {
        match fs::remove_dir_all(name) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            outcome => outcome.map_err(Into::into),
        }
    }

    /// The raw rename primitive; underlying errors pass through.
    pub fn rename(&self, from: &str, to: &str) -> Result<(), FsOpError> {
        self.rename_resolved(Path::new(from), Path::new(to))
            .map_err(Into::into)
    }

    /// Reads the named directory, entries sorted by file name.
    pub fn read_dir(&self, name: &str) -> Result<Vec<fs::DirEntry>, FsOpError> {
        let mut entries = fs::read_dir(name)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());
        Ok(entries)
    }

    /// Makes sure a path exists at a particular location and answers the
    /// full effective path.
    ///
    /// The file interpretation creates the parent directory and answers
    /// `as.name` itself when the file already exists, falling back to the
    /// cleaned parent/file join. The directory interpretation creates the
    /// whole path and answers it joined with the default.
    pub fn ensure(&self, as_: PathAs<'_>) -> Result<String, FsOpError> {
        if as_.as_file {
            let (directory, file) = self.calc.split(as_.name);
            if !directory.is_empty() {
                self.make_dir_all(directory)?;
            }

            if self.file_exists(as_.name) {
                return Ok(as_.name.to_string());
            }

            return Ok(self.calc.clean(&self.calc.join(&[directory, file])));
        }

        self.make_dir_all(as_.name)?;
        Ok(self.calc.clean(&self.calc.join(&[as_.name, as_.default])))
    }
}

impl ExistsIn for NativeFs {
    fn file_exists(&self, name: &str) -> bool {
        fs::metadata(name).map(|info| info.is_file()).unwrap_or(false)
    }

    fn directory_exists(&self, name: &str) -> bool {
        fs::metadata(name).map(|info| info.is_dir()).unwrap_or(false)
    }
}

impl RenameAt for NativeFs {
    fn rename_resolved(&self, from: &Path, to: &Path) -> io::Result<()> {
        debug!(from = %from.display(), to = %to.display(), "rename primitive");
        fs::rename(from, to)
    }
}
