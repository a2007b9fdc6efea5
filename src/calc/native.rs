//! Native-absolute path arithmetic, following platform path conventions.

use std::path::{self, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use super::{PathCalc, lexical_clean};

/// Path arithmetic for native-absolute paths: the platform separator is
/// authoritative and a leading separator denotes the file system root.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeCalc;

impl PathCalc for NativeCalc {
    fn base<'a>(&self, path: &'a str) -> &'a str {
        if path.is_empty() {
            return ".";
        }

        let trimmed = path.trim_end_matches(path::is_separator);
        if trimmed.is_empty() {
            // all separators, the root is its own base
            return MAIN_SEPARATOR_STR;
        }

        match trimmed.rfind(path::is_separator) {
            Some(at) => &trimmed[at + 1..],
            None => trimmed,
        }
    }

    fn clean(&self, path: &str) -> String {
        lexical_clean(path, MAIN_SEPARATOR)
    }

    fn dir(&self, path: &str) -> String {
        let (directory, _) = self.split(path);
        self.clean(directory)
    }

    fn elements<'a>(&self, path: &'a str) -> Vec<&'a str> {
        if path.is_empty() {
            return Vec::new();
        }

        path.split(path::is_separator).collect()
    }

    fn join(&self, elements: &[&str]) -> String {
        if elements.is_empty() {
            return ".".to_string();
        }

        let joined = elements
            .iter()
            .filter(|element| !element.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(MAIN_SEPARATOR_STR);

        if joined.is_empty() {
            return String::new();
        }

        self.clean(&joined)
    }

    fn split<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        match path.rfind(path::is_separator) {
            Some(at) => path.split_at(at + 1),
            None => ("", path),
        }
    }

    fn truncate<'a>(&self, path: &'a str) -> &'a str {
        if path.is_empty() {
            return ".";
        }

        if !path.ends_with(path::is_separator) {
            return path;
        }

        &path[..path.rfind(path::is_separator).unwrap_or(0)]
    }

    fn contains_separator(&self, path: &str) -> bool {
        path.chars().any(path::is_separator)
    }
}
