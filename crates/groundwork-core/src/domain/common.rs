use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to be **relative**.
///
/// Templates and staged writes must never carry absolute paths:
/// they break portability and can overwrite arbitrary locations.
/// `RelativePath` is a semantic guardrail, not a filesystem abstraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the provided path is absolute.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.is_absolute(),
            "RelativePath cannot be absolute: {path:?}"
        );
        Self(path)
    }

    /// Non-panicking variant.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Join a path segment onto this relative path.
    ///
    /// # Panics
    /// Panics if the joined segment is absolute.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let segment = segment.as_ref();
        assert!(
            !segment.is_absolute(),
            "cannot join absolute path to RelativePath"
        );
        Self(self.0.join(segment))
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume into a `PathBuf`.
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        RelativePath::new(s)
    }
}

impl From<String> for RelativePath {
    fn from(s: String) -> Self {
        RelativePath::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// The `../` prefix that climbs from `root` back to the workspace root.
///
/// Templates materialized inside a nested project directory use this to
/// reference workspace-root files (e.g. `extends: "../../tsconfig.json"`).
/// An empty or `.` root yields `"./"`.
pub fn offset_from_root(root: &RelativePath) -> String {
    let depth = root
        .as_path()
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------------
    // RelativePath
    // ---------------------------------------------------------------------

    #[test]
    fn relative_path_accepts_relative() {
        let p = RelativePath::new("apps/shop");
        assert_eq!(p.as_path(), Path::new("apps/shop"));
    }

    #[test]
    #[should_panic]
    fn relative_path_rejects_absolute() {
        RelativePath::new("/etc/passwd");
    }

    #[test]
    fn try_new_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn join_relative_path() {
        let base = RelativePath::new("apps/shop");
        let joined = base.join("serverless.yml");
        assert_eq!(joined.as_path(), Path::new("apps/shop/serverless.yml"));
    }

    #[test]
    #[should_panic]
    fn join_rejects_absolute_segment() {
        let base = RelativePath::new("apps");
        base.join("/etc/passwd");
    }

    // ---------------------------------------------------------------------
    // offset_from_root
    // ---------------------------------------------------------------------

    #[test]
    fn offset_climbs_one_level_per_component() {
        assert_eq!(offset_from_root(&RelativePath::new("apps/shop")), "../../");
        assert_eq!(offset_from_root(&RelativePath::new("shop")), "../");
    }

    #[test]
    fn offset_for_workspace_root_is_dot_slash() {
        assert_eq!(offset_from_root(&RelativePath::new("")), "./");
        assert_eq!(offset_from_root(&RelativePath::new(".")), "./");
    }
}
