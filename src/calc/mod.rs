//! Pure path-string arithmetic under two distinct rule sets.
//!
//! Paths handed to a file system value are opaque strings with one of two
//! interpretations, never mixed within a single value:
//!
//! - *native-absolute*: platform separator semantics ([`NativeCalc`]);
//! - *root-relative*: a virtual, forward-slash-only path space mapped onto
//!   an underlying file system at a fixed root ([`RelativeCalc`]).
//!
//! One might think that building virtual paths with the platform separator
//! is the prudent thing to do, but virtual paths only ever use '/' and the
//! platform separator has no business appearing in them. That is why the
//! calculus exists in two variants rather than one.
//!
//! None of these operations fail; malformed input degrades to the
//! empty-path boundary behavior documented on each method. Callers that
//! need validation perform it before invoking the calculus.

mod native;
mod relative;

pub use native::NativeCalc;
pub use relative::RelativeCalc;

/// Whole-path to directory/base/segment decomposition.
///
/// Stateless except for the immutable root carried by the relative variant,
/// which never alters the arithmetic rules.
pub trait PathCalc: Send + Sync {
    /// Last element of the path. Empty input yields `"."`.
    fn base<'a>(&self, path: &'a str) -> &'a str;

    /// Shortest equivalent path by purely lexical processing.
    /// Empty input yields `"."`.
    fn clean(&self, path: &str) -> String;

    /// All but the last element of the path. Empty and single-segment
    /// inputs yield `"."`.
    fn dir(&self, path: &str) -> String;

    /// The path split into its raw segments. Empty input yields no
    /// segments; separators are kept as empty segments, not collapsed.
    fn elements<'a>(&self, path: &'a str) -> Vec<&'a str>;

    /// Joins path elements into a single path.
    fn join(&self, elements: &[&str]) -> String;

    /// Splits the path immediately following the final separator into a
    /// (directory, file) pair. Empty input yields `("", "")`.
    fn split<'a>(&self, path: &'a str) -> (&'a str, &'a str);

    /// Removes a trailing separator-terminated segment; paths without a
    /// trailing separator pass through unchanged. Empty input yields `"."`.
    fn truncate<'a>(&self, path: &'a str) -> &'a str;

    /// Whether the string contains any separator this calculus recognises.
    fn contains_separator(&self, path: &str) -> bool;
}

/// Lexical clean shared by both variants: collapses repeated separators,
/// drops `.` segments, resolves `..` against preceding segments, and strips
/// any trailing separator. A rooted path keeps its leading separator and
/// swallows `..` at the root.
pub(crate) fn lexical_clean(path: &str, sep: char) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with(sep);
    let mut kept: Vec<&str> = Vec::new();

    for segment in path.split(sep) {
        match segment {
            "" | "." => {}
            ".." => match kept.last() {
                Some(&prior) if prior != ".." => {
                    kept.pop();
                }
                None if rooted => {}
                _ => kept.push(".."),
            },
            other => kept.push(other),
        }
    }

    let body = kept.join(&sep.to_string());

    match (rooted, body.is_empty()) {
        (true, true) => sep.to_string(),
        (true, false) => format!("{sep}{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
