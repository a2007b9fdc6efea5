//! The change dispatch engine: rename an item within its existing parent
//! directory, the structural inverse of move's same-directory rejection.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::calc::PathCalc;
use crate::errors::FsOpError;
use crate::fsys::{ExistsIn, Policy, RenameAt};

use super::{OpMask, peek};

const OP: &str = "Change";

/// One slot of the change dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    /// Rename within the parent; identical paths are a no-op.
    Rename,
    /// The destination already exists as a file; rejected, unless both
    /// names resolve to the same item.
    RejectClash,
    /// Unpopulated slot.
    Reject,
}

fn table_for(policy: Policy) -> [Action; OpMask::SLOTS] {
    let file_on_file = match policy {
        Policy::Overwrite => Action::Rename,
        Policy::Tentative => Action::RejectClash,
    };

    let mut table = [Action::Reject; OpMask::SLOTS];
    table[OpMask::new(true, false, false, false).index()] = Action::Rename; // from exists as file, to does not exist
    table[OpMask::new(true, false, true, false).index()] = Action::Rename; // from exists as dir, to does not exist
    table[OpMask::new(true, true, true, true).index()] = Action::Rename; // from exists as dir, to exists as dir
    table[OpMask::new(true, true, false, false).index()] = file_on_file; // from and to may refer to the same existing file
    table
}

/// Change engine for one file system value. Owns its dispatch table; the
/// owning value builds it at most once and reuses it for its lifetime.
pub(crate) struct Changer {
    root: PathBuf,
    table: [Action; OpMask::SLOTS],
}

impl Changer {
    pub(crate) fn new(root: impl Into<PathBuf>, policy: Policy) -> Self {
        Self {
            root: root.into(),
            table: table_for(policy),
        }
    }

    pub(crate) fn change_item<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        to: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        // the guard fires before any probe
        if calc.contains_separator(to) {
            return Err(FsOpError::invalid_path(
                "change rejected, 'to' must be a bare name without separator",
                to,
            ));
        }

        let destination = fill(calc, from, to);
        let (from_exists, from_is_dir) = peek(fs, from);
        let (to_exists, to_is_dir) = peek(fs, &destination);
        let mask = OpMask::new(from_exists, to_exists, from_is_dir, to_is_dir);
        let action = self.table[mask.index()];
        debug!(op = OP, from, to, destination, ?mask, ?action, "dispatch");

        match action {
            Action::Rename => self.rename(fs, calc, from, &destination),
            Action::RejectClash => {
                if identical(calc, from, &destination) {
                    return Ok(());
                }

                Err(FsOpError::binary_op(OP, from, to))
            }
            Action::Reject => Err(FsOpError::binary_op(OP, from, to)),
        }
    }

    fn rename<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        destination: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        if identical(calc, from, destination) {
            debug!(op = OP, from, "identical paths, nothing to do");
            return Ok(());
        }

        let source = self.root.join(from);
        let target = self.root.join(destination);
        info!(op = OP, from = %source.display(), to = %target.display(), "rename");

        fs.rename_resolved(&source, &target)?;
        Ok(())
    }
}

/// The parent from 'from' combined with the bare 'to', ie given
/// from 'foo/bar/baz.txt' and to 'pez.txt', yields 'foo/bar/pez.txt'.
fn fill(calc: &dyn PathCalc, from: &str, to: &str) -> String {
    let parent = calc.dir(from);
    if parent.is_empty() || parent == "." {
        return to.to_string();
    }

    calc.join(&[&parent, to])
}

fn identical(calc: &dyn PathCalc, from: &str, to: &str) -> bool {
    calc.clean(from) == calc.clean(to)
}
