//! Core library for `rovefs`.
//!
//! A path-aware move/rename layer over two path spaces: the native file
//! system, and a sandboxed virtual file system rooted at a fixed absolute
//! path. Client code performs three operations — move (new parent,
//! optionally a new name), change (new name, same parent), and the raw
//! rename primitive — under an overwrite policy fixed per value.
//!
//! The interesting part is the dispatch engine: each operation probes the
//! existence and type of its source and computed destination, classifies
//! the pair into a four-boolean mask, and looks the mask up in a fixed
//! per-policy table. Structurally invalid requests (disguised renames,
//! same-directory moves, directory-name clashes) are rejected with typed
//! errors rather than handed to the underlying storage.
//!
//! ```no_run
//! use rovefs::{Policy, RelativeFs};
//!
//! let fs = RelativeFs::new("/var/lib/app", Policy::Tentative);
//! fs.move_item("incoming/report.txt", "archive")?;
//! fs.change_item("archive/report.txt", "report-2026.txt")?;
//! # Ok::<(), rovefs::FsOpError>(())
//! ```

pub mod calc;
pub mod errors;
pub mod fsys;
mod ops;
pub mod resolve;

pub use calc::{NativeCalc, PathCalc, RelativeCalc};
pub use errors::FsOpError;
pub use fsys::{ExistsIn, NativeFs, PathAs, Policy, RelativeFs, RenameAt};
pub use resolve::{is_same_location, resolve_path, separate};
