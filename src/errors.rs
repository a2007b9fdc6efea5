//! Typed error definitions for rovefs.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Every engine failure is a plain, inspectable value. Underlying I/O errors
//! are wrapped transparently and surfaced to the caller unchanged; nothing
//! here retries or reinterprets them.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsOpError {
    /// The path fails basic shape validation, or a change destination
    /// contains a separator.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { reason: String, path: String },

    /// The probed source/destination pair matched no dispatch table entry,
    /// or a tentative-policy clash was detected.
    #[error("invalid binary file system operation: op '{op}', from '{from}', to '{to}'")]
    BinaryFsOp {
        op: &'static str,
        from: String,
        to: String,
    },

    /// Move detected that source and destination share a parent directory;
    /// the caller should use change instead.
    #[error("same directory move rejected: op '{op}', from '{from}', to '{to}', use change instead")]
    SameDirMove {
        op: &'static str,
        from: String,
        to: String,
    },

    /// Symmetric counterpart of [`FsOpError::SameDirMove`], reserved for a
    /// change detecting a different-directory target. No current code path
    /// constructs it; kept so clients can match on the full classification.
    #[error("different directory change rejected: op '{op}', from '{from}', to '{to}', use move instead")]
    DifferentDirChange {
        op: &'static str,
        from: String,
        to: String,
    },

    /// The operation is deliberately not implemented (eg copy, merge).
    #[error("operation '{op}' is not supported")]
    Unsupported { op: &'static str },

    /// Pass-through from the underlying storage primitive.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FsOpError {
    pub(crate) fn invalid_path(reason: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidPath {
            reason: reason.into(),
            path: path.into(),
        }
    }

    pub(crate) fn binary_op(op: &'static str, from: &str, to: &str) -> Self {
        Self::BinaryFsOp {
            op,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub(crate) fn same_dir_move(op: &'static str, from: &str, to: &str) -> Self {
        Self::SameDirMove {
            op,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// True when the error is a path shape violation.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// True when the dispatch engine found no handler for the probed pair.
    pub fn is_binary_op(&self) -> bool {
        matches!(self, Self::BinaryFsOp { .. })
    }

    /// True when a move was rejected because both paths share a parent.
    pub fn is_same_dir_move(&self) -> bool {
        matches!(self, Self::SameDirMove { .. })
    }
}
