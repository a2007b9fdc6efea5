//! Root-relative path arithmetic over a virtual, forward-slash-only space.

use super::{PathCalc, lexical_clean};

pub(crate) const SEPARATOR: char = '/';

/// Path arithmetic for the sandboxed, root-relative path space. Paths use
/// '/' regardless of host platform and never begin or end with it; the
/// virtual space has no absolute root of its own, so cleaning the root
/// marker collapses to `"."` and any leading separator is stripped.
///
/// The root is carried for display and resolution only; it plays no part
/// in the arithmetic.
#[derive(Clone, Debug)]
pub struct RelativeCalc {
    root: String,
}

impl RelativeCalc {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// The fixed root this calculus resolves against.
    pub fn root(&self) -> &str {
        &self.root
    }
}

impl PathCalc for RelativeCalc {
    fn base<'a>(&self, path: &'a str) -> &'a str {
        if path.is_empty() {
            return ".";
        }

        // a trailing separator denotes directory intent, not a segment
        let trimmed = path.trim_end_matches(SEPARATOR);
        if trimmed.is_empty() {
            return ".";
        }

        match trimmed.rfind(SEPARATOR) {
            Some(at) => &trimmed[at + 1..],
            None => trimmed,
        }
    }

    fn clean(&self, path: &str) -> String {
        let cleaned = lexical_clean(path, SEPARATOR);

        if cleaned == "/" {
            return ".".to_string();
        }

        match cleaned.strip_prefix(SEPARATOR) {
            Some(stripped) => stripped.to_string(),
            None => cleaned,
        }
    }

    fn dir(&self, path: &str) -> String {
        match path.rfind(SEPARATOR) {
            Some(at) => path[..at].to_string(),
            None => ".".to_string(),
        }
    }

    fn elements<'a>(&self, path: &'a str) -> Vec<&'a str> {
        if path.is_empty() {
            return Vec::new();
        }

        path.split(SEPARATOR).collect()
    }

    fn join(&self, elements: &[&str]) -> String {
        elements.join("/")
    }

    fn split<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        if path.is_empty() {
            return ("", "");
        }

        match path.rfind(SEPARATOR) {
            Some(at) => (&path[..at], self.base(path)),
            None => ("", path),
        }
    }

    fn truncate<'a>(&self, path: &'a str) -> &'a str {
        if path.is_empty() {
            return ".";
        }

        if !path.ends_with(SEPARATOR) {
            return path;
        }

        &path[..path.rfind(SEPARATOR).unwrap_or(0)]
    }

    fn contains_separator(&self, path: &str) -> bool {
        path.contains(SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_is_plain_concatenation() {
        let calc = RelativeCalc::new("/home/root");
        // no cleaning, by contract; callers clean when they need to
        assert_eq!(calc.join(&["foo", "", "bar"]), "foo//bar");
    }

    #[test]
    fn dir_of_bare_name_is_dot() {
        let calc = RelativeCalc::new("/home/root");
        assert_eq!(calc.dir("foo.txt"), ".");
    }

    #[test]
    fn leading_separator_is_stripped_by_clean() {
        let calc = RelativeCalc::new("/home/root");
        assert_eq!(calc.clean("/foo/bar"), "foo/bar");
        assert_eq!(calc.clean("//"), ".");
    }

    #[test]
    fn root_is_display_only() {
        let calc = RelativeCalc::new("/home/root");
        assert_eq!(calc.root(), "/home/root");
        // root plays no part in the arithmetic
        assert_eq!(calc.base("foo/bar"), "bar");
    }
}
