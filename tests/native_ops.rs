//! The same dispatch engines over native-absolute paths.

use std::fs;

use rovefs::{ExistsIn, FsOpError, NativeFs, PathAs, Policy};
use tempfile::tempdir;

fn path_of(root: &tempfile::TempDir, tail: &str) -> String {
    root.path().join(tail).to_string_lossy().into_owned()
}

#[test]
fn moves_file_into_directory() {
    for policy in [Policy::Overwrite, Policy::Tentative] {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("src")).unwrap();
        fs::create_dir_all(root.path().join("dest")).unwrap();
        fs::write(root.path().join("src/a.txt"), "payload").unwrap();

        let fs_value = NativeFs::new(policy);
        fs_value
            .move_item(&path_of(&root, "src/a.txt"), &path_of(&root, "dest"))
            .unwrap();

        assert!(fs_value.file_exists(&path_of(&root, "dest/a.txt")));
        assert!(!fs_value.file_exists(&path_of(&root, "src/a.txt")));
    }
}

#[test]
fn moves_directory_into_directory() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("work/drafts")).unwrap();
    fs::create_dir_all(root.path().join("archive")).unwrap();

    let fs_value = NativeFs::new(Policy::Tentative);
    fs_value
        .move_item(&path_of(&root, "work/drafts"), &path_of(&root, "archive"))
        .unwrap();

    assert!(fs_value.directory_exists(&path_of(&root, "archive/drafts")));
    assert!(!fs_value.directory_exists(&path_of(&root, "work/drafts")));
}

#[test]
fn same_directory_move_rejected() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("src")).unwrap();
    fs::write(root.path().join("src/a.txt"), "x").unwrap();

    let fs_value = NativeFs::new(Policy::Overwrite);
    let err = fs_value
        .move_item(&path_of(&root, "src/a.txt"), &path_of(&root, "src/b.txt"))
        .unwrap_err();

    assert!(err.is_same_dir_move());
    assert!(fs_value.file_exists(&path_of(&root, "src/a.txt")));
}

#[test]
fn change_renames_in_place() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("src")).unwrap();
    fs::write(root.path().join("src/a.txt"), "x").unwrap();

    let fs_value = NativeFs::new(Policy::Tentative);
    fs_value
        .change_item(&path_of(&root, "src/a.txt"), "b.txt")
        .unwrap();

    assert!(fs_value.file_exists(&path_of(&root, "src/b.txt")));
    assert!(!fs_value.file_exists(&path_of(&root, "src/a.txt")));
}

#[test]
fn change_guards_against_pathed_destination() {
    let fs_value = NativeFs::new(Policy::Tentative);

    let err = fs_value.change_item("/src/a.txt", "other/b.txt").unwrap_err();
    assert!(err.is_invalid_path());
}

#[test]
fn ensure_answers_full_native_paths() {
    let root = tempdir().unwrap();
    let fs_value = NativeFs::new(Policy::Tentative);

    let name = path_of(&root, "cache/state/current.json");
    let at = fs_value
        .ensure(PathAs {
            name: &name,
            default: "state.json",
            as_file: true,
        })
        .unwrap();

    assert_eq!(at, name);
    assert!(fs_value.directory_exists(&path_of(&root, "cache/state")));

    let name = path_of(&root, "exports/daily");
    let at = fs_value
        .ensure(PathAs {
            name: &name,
            default: "report.csv",
            as_file: false,
        })
        .unwrap();

    assert_eq!(at, path_of(&root, "exports/daily/report.csv"));
    assert!(fs_value.directory_exists(&path_of(&root, "exports/daily")));
}

#[test]
fn copy_rejection_is_preserved() {
    let fs_value = NativeFs::new(Policy::Overwrite);
    let err = fs_value.copy("/a", "/b").unwrap_err();
    assert!(matches!(err, FsOpError::Unsupported { op: "Copy" }));
}
