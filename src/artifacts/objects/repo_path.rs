//! Canonical repository paths
//!
//! Every path stored in the index, recorded in a commit, or compared by the
//! status and diff engines goes through [`RepoPath`]. Keys are relative to the
//! repository root, `/`-separated, and contain no `.` or `..` components, so a
//! file reached as `./a/../a/b.txt` and one reached as `a/b.txt` share a key.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Component, Path, PathBuf};

const SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RepoPath(String);

impl RepoPath {
    /// Normalize a path relative to the repository root.
    ///
    /// Returns `None` for empty paths, absolute paths, paths escaping the root
    /// through `..`, and names that are not valid UTF-8.
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut parts: Vec<&str> = Vec::new();

        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    parts.pop()?;
                }
                Component::Normal(name) => parts.push(name.to_str()?),
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        if parts.is_empty() {
            return None;
        }

        Some(Self(parts.join(SEPARATOR)))
    }

    /// Normalize an absolute path against the repository root.
    pub fn from_absolute(root: &Path, path: &Path) -> Option<Self> {
        path.strip_prefix(root)
            .ok()
            .and_then(Self::from_relative)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path as a relative file system path
    pub fn to_path(&self) -> PathBuf {
        self.0.split(SEPARATOR).collect()
    }

    /// Whether any component of this path is exactly `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.0.split(SEPARATOR).any(|component| component == name)
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RepoPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RepoPath::from_relative(Path::new(&raw))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid repository path: {raw}")))
    }
}
