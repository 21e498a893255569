//! Normalized route paths.
//!
//! Every location the console can be at is an [`AppPath`]. Construction is
//! total: any input is normalized rather than rejected, so comparisons between
//! the path the router reports and the paths the guard redirects to are always
//! made on the same canonical form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An absolute, normalized route path such as `/intro/images`.
///
/// Invariants: starts with `/`, contains no empty segments, has no trailing
/// slash unless it is the root, and carries no query string or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AppPath(String);

impl AppPath {
    /// Normalize `raw` into a route path.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        let without_suffix = raw.split(['?', '#']).next().unwrap_or("");

        let segments: Vec<&str> = without_suffix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            Self::root()
        } else {
            Self(format!("/{}", segments.join("/")))
        }
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Path segments without the leading slash. The root has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// First segment, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    /// Append a relative path below this one.
    pub fn join(&self, relative: &str) -> Self {
        Self::new(format!("{}/{}", self.0, relative))
    }

    /// True when `self` equals `base` or lies below it, matching whole
    /// segments only (`/intro/users` is not under `/intro/user`).
    pub fn is_under(&self, base: &AppPath) -> bool {
        self.relative_to(base).is_some()
    }

    /// The remainder of `self` below `base`, without a leading slash.
    ///
    /// Returns `Some("")` when the paths are equal and `None` when `self` is
    /// not under `base`.
    pub fn relative_to(&self, base: &AppPath) -> Option<&str> {
        if base.is_root() {
            return Some(self.0.trim_start_matches('/'));
        }
        let rest = self.0.strip_prefix(base.as_str())?;
        if rest.is_empty() {
            Some("")
        } else {
            rest.strip_prefix('/')
        }
    }
}

impl Default for AppPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for AppPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for AppPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<AppPath> for String {
    fn from(path: AppPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(AppPath::new("intro/images").as_str(), "/intro/images");
        assert_eq!(AppPath::new("/intro//images/").as_str(), "/intro/images");
        assert_eq!(AppPath::new("/machines?q=ready#top").as_str(), "/machines");
        assert_eq!(AppPath::new("").as_str(), "/");
        assert_eq!(AppPath::new("///").as_str(), "/");
    }

    #[test]
    fn test_is_under_matches_whole_segments() {
        let user = AppPath::new("/intro/user");
        assert!(AppPath::new("/intro/user").is_under(&user));
        assert!(AppPath::new("/intro/user/keys").is_under(&user));
        assert!(!AppPath::new("/intro/users").is_under(&user));
        assert!(!AppPath::new("/intro").is_under(&user));
        assert!(AppPath::new("/anything").is_under(&AppPath::root()));
    }

    #[test]
    fn test_relative_to() {
        let intro = AppPath::new("/intro");
        assert_eq!(AppPath::new("/intro").relative_to(&intro), Some(""));
        assert_eq!(AppPath::new("/intro/images").relative_to(&intro), Some("images"));
        assert_eq!(AppPath::new("/machines").relative_to(&intro), None);
    }

    #[test]
    fn test_join() {
        let base = AppPath::new("/intro");
        assert_eq!(base.join("user").as_str(), "/intro/user");
        assert_eq!(AppPath::root().join("tags").as_str(), "/tags");
    }
}
