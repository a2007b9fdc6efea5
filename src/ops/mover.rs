//! The move dispatch engine: relocate a file or directory to a new parent,
//! optionally renaming it in the same step.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::calc::PathCalc;
use crate::errors::FsOpError;
use crate::fsys::{ExistsIn, Policy, RenameAt};

use super::{OpMask, peek, query};

const OP: &str = "Move";

/// One slot of the move dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    /// 'to' includes the final name (from/file.txt => to/file.txt); a
    /// shared parent is a disguised rename and is rejected.
    WithName,
    /// 'to' is an existing directory, the name is appended
    /// (from/file.txt => to/).
    IntoDir,
    /// As [`Action::IntoDir`], but an existing appended destination is a
    /// clash and is rejected first.
    IntoDirProbed,
    /// Directory into directory; equal names would need a merge, which is
    /// unsupported, so they are rejected.
    IntoDirGuarded,
    /// Both names refer to existing files; the destination is replaced,
    /// unless both resolve to the same item.
    ReplaceOrNoOp,
    /// Both names refer to existing files; rejected, unless both resolve
    /// to the same item.
    NoOpOrReject,
    /// Unpopulated slot.
    Reject,
}

fn table_for(policy: Policy) -> [Action; OpMask::SLOTS] {
    let (into_dir, file_on_file) = match policy {
        Policy::Overwrite => (Action::IntoDir, Action::ReplaceOrNoOp),
        Policy::Tentative => (Action::IntoDirProbed, Action::NoOpOrReject),
    };

    let mut table = [Action::Reject; OpMask::SLOTS];
    table[OpMask::new(true, false, false, false).index()] = Action::WithName; // from exists as file, to does not exist
    table[OpMask::new(true, false, true, false).index()] = Action::WithName; // from exists as dir, to does not exist
    table[OpMask::new(true, true, false, true).index()] = into_dir; // from exists as file, to exists as dir
    table[OpMask::new(true, true, true, true).index()] = Action::IntoDirGuarded; // from exists as dir, to exists as dir
    table[OpMask::new(true, true, false, false).index()] = file_on_file; // from and to may refer to the same existing file
    table
}

/// Move engine for one file system value. Owns its dispatch table; the
/// owning value builds it at most once and reuses it for its lifetime.
pub(crate) struct Mover {
    root: PathBuf,
    table: [Action; OpMask::SLOTS],
}

impl Mover {
    pub(crate) fn new(root: impl Into<PathBuf>, policy: Policy) -> Self {
        Self {
            root: root.into(),
            table: table_for(policy),
        }
    }

    pub(crate) fn move_item<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        to: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        let mask = query(fs, from, to);
        let action = self.table[mask.index()];
        debug!(op = OP, from, to, ?mask, ?action, "dispatch");

        match action {
            Action::WithName => self.with_name(fs, calc, from, to),
            Action::IntoDir => self.into_dir(fs, calc, from, to),
            Action::IntoDirProbed => {
                let appended = calc.join(&[to, calc.base(from)]);
                let (exists, _) = peek(fs, &appended);
                if exists {
                    return Err(FsOpError::binary_op(OP, from, to));
                }

                self.into_dir(fs, calc, from, to)
            }
            Action::IntoDirGuarded => {
                if calc.base(from) == calc.base(to) {
                    // a merge facility would go here instead of an error
                    return Err(FsOpError::same_dir_move(OP, from, to));
                }

                self.into_dir(fs, calc, from, to)
            }
            Action::ReplaceOrNoOp => self.rename(fs, calc, from, to),
            Action::NoOpOrReject => {
                if identical(calc, from, to) {
                    return Ok(());
                }

                Err(FsOpError::binary_op(OP, from, to))
            }
            Action::Reject => Err(FsOpError::binary_op(OP, from, to)),
        }
    }

    /// 'to' includes the file name, eg from/file.txt => to/file.txt.
    fn with_name<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        to: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        if calc.dir(from) == calc.dir(to) {
            return Err(FsOpError::same_dir_move(OP, from, to));
        }

        self.rename(fs, calc, from, to)
    }

    /// 'to' does not include the file name, so it has to be appended, eg
    /// from/file.txt => to/.
    fn into_dir<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        to: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        let appended = calc.join(&[to, calc.base(from)]);
        self.rename(fs, calc, from, &appended)
    }

    fn rename<F>(
        &self,
        fs: &F,
        calc: &dyn PathCalc,
        from: &str,
        to: &str,
    ) -> Result<(), FsOpError>
    where
        F: ExistsIn + RenameAt + ?Sized,
    {
        if identical(calc, from, to) {
            debug!(op = OP, from, "identical paths, nothing to do");
            return Ok(());
        }

        let source = self.root.join(from);
        let destination = self.root.join(to);
        info!(op = OP, from = %source.display(), to = %destination.display(), "rename");

        fs.rename_resolved(&source, &destination)?;
        Ok(())
    }
}

/// The rename primitive is never invoked when both names resolve to the
/// same path; every handler short-circuits to a no-op through here.
fn identical(calc: &dyn PathCalc, from: &str, to: &str) -> bool {
    calc.clean(from) == calc.clean(to)
}

#[cfg(test)]
mod tests {
    use super::super::harness::MemFs;
    use super::*;
    use crate::calc::RelativeCalc;

    fn mover(policy: Policy) -> (Mover, RelativeCalc) {
        (Mover::new("/root", policy), RelativeCalc::new("/root"))
    }

    #[test]
    fn with_name_renames_across_directories() {
        let fs = MemFs::with(&["src/a.txt"], &["src", "dest"]);
        let (mover, calc) = mover(Policy::Tentative);

        mover
            .move_item(&fs, &calc, "src/a.txt", "dest/a.txt")
            .unwrap();
        assert_eq!(
            fs.renames.borrow()[0],
            ("/root/src/a.txt".into(), "/root/dest/a.txt".into())
        );
    }

    #[test]
    fn with_name_rejects_shared_parent() {
        for policy in [Policy::Overwrite, Policy::Tentative] {
            let fs = MemFs::with(&["src/a.txt"], &["src"]);
            let (mover, calc) = self::mover(policy);

            let err = mover
                .move_item(&fs, &calc, "src/a.txt", "src/b.txt")
                .unwrap_err();
            assert!(err.is_same_dir_move());
            assert_eq!(fs.rename_count(), 0);
        }
    }

    #[test]
    fn into_directory_appends_source_name() {
        let fs = MemFs::with(&["src/a.txt"], &["src", "dest"]);
        let (mover, calc) = mover(Policy::Overwrite);

        mover.move_item(&fs, &calc, "src/a.txt", "dest").unwrap();
        assert_eq!(
            fs.renames.borrow()[0],
            ("/root/src/a.txt".into(), "/root/dest/a.txt".into())
        );
    }

    #[test]
    fn tentative_into_directory_rejects_clash() {
        let fs = MemFs::with(&["src/a.txt", "dest/a.txt"], &["src", "dest"]);
        let (mover, calc) = mover(Policy::Tentative);

        let err = mover.move_item(&fs, &calc, "src/a.txt", "dest").unwrap_err();
        assert!(err.is_binary_op());
        assert_eq!(fs.rename_count(), 0);
    }

    #[test]
    fn overwrite_into_directory_ignores_clash() {
        let fs = MemFs::with(&["src/a.txt", "dest/a.txt"], &["src", "dest"]);
        let (mover, calc) = mover(Policy::Overwrite);

        mover.move_item(&fs, &calc, "src/a.txt", "dest").unwrap();
        assert_eq!(fs.rename_count(), 1);
    }

    #[test]
    fn directory_into_directory_rejects_equal_names() {
        for policy in [Policy::Overwrite, Policy::Tentative] {
            let fs = MemFs::with(&[], &["top/widgets", "store/widgets"]);
            let (mover, calc) = self::mover(policy);

            let err = mover
                .move_item(&fs, &calc, "top/widgets", "store/widgets")
                .unwrap_err();
            assert!(err.is_same_dir_move());
            assert_eq!(fs.rename_count(), 0);
        }
    }

    #[test]
    fn same_file_is_a_no_op_under_both_policies() {
        for policy in [Policy::Overwrite, Policy::Tentative] {
            let fs = MemFs::with(&["src/a.txt"], &["src"]);
            let (mover, calc) = self::mover(policy);

            mover
                .move_item(&fs, &calc, "src/a.txt", "src/a.txt")
                .unwrap();
            // the rename primitive must never see identical paths
            assert_eq!(fs.rename_count(), 0);
        }
    }

    #[test]
    fn distinct_file_clash_splits_on_policy() {
        let files = &["src/a.txt", "other/b.txt"];
        let dirs = &["src", "other"];

        let fs = MemFs::with(files, dirs);
        let (mover, calc) = self::mover(Policy::Overwrite);
        mover
            .move_item(&fs, &calc, "src/a.txt", "other/b.txt")
            .unwrap();
        assert_eq!(fs.rename_count(), 1);

        let fs = MemFs::with(files, dirs);
        let (mover, calc) = self::mover(Policy::Tentative);
        let err = mover
            .move_item(&fs, &calc, "src/a.txt", "other/b.txt")
            .unwrap_err();
        assert!(err.is_binary_op());
        assert_eq!(fs.rename_count(), 0);
    }

    #[test]
    fn missing_source_falls_through_to_reject() {
        for policy in [Policy::Overwrite, Policy::Tentative] {
            let fs = MemFs::with(&[], &["dest"]);
            let (mover, calc) = self::mover(policy);

            let err = mover.move_item(&fs, &calc, "ghost.txt", "dest").unwrap_err();
            assert!(err.is_binary_op());
        }
    }

    #[test]
    fn file_onto_existing_directory_mask_is_unpopulated() {
        // {from file, to dir} is handled; {from dir, to file} is not
        let fs = MemFs::with(&["target.txt"], &["src/d"]);
        let (mover, calc) = mover(Policy::Overwrite);

        let err = mover.move_item(&fs, &calc, "src/d", "target.txt").unwrap_err();
        assert!(err.is_binary_op());
    }
}
