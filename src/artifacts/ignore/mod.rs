//! Ignore rules
//!
//! Paths are ignored when they sit inside the metadata directory (or a `.git`
//! directory), match one of the built-in patterns, or match a line of the
//! optional `.gitterignore` file at the repository root. Patterns use
//! gitignore syntax and are matched against repository-relative paths, so a
//! pattern naming a directory also ignores everything beneath it.

use crate::artifacts::objects::repo_path::RepoPath;
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Directory holding the repository state
pub const METADATA_DIR: &str = ".gitter";

/// Per-repository ignore file
pub const IGNORE_FILE: &str = ".gitterignore";

const ALWAYS_IGNORED_DIRS: [&str; 2] = [METADATA_DIR, ".git"];

const DEFAULT_PATTERNS: [&str; 9] = [
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "__pycache__",
    "*.so",
    "*.o",
    "*.a",
    "*.dll",
    ".git",
];

#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Built-in patterns plus the repository's `.gitterignore`, if any.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let mut builder = Self::default_builder(root)?;

        let ignore_file = root.join(IGNORE_FILE);
        if ignore_file.is_file() {
            // a bad line only drops that line
            if let Some(error) = builder.add(&ignore_file) {
                log::warn!("skipping invalid patterns in {}: {error}", ignore_file.display());
            }
        }

        let matcher = builder
            .build()
            .context(format!("Unable to build ignore rules for {}", root.display()))?;

        Ok(IgnoreRules { matcher })
    }

    fn default_builder(root: &Path) -> anyhow::Result<GitignoreBuilder> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in DEFAULT_PATTERNS {
            builder.add_line(None, pattern)?;
        }

        Ok(builder)
    }

    pub fn is_ignored(&self, path: &RepoPath, is_dir: bool) -> bool {
        if ALWAYS_IGNORED_DIRS.iter().any(|dir| path.has_component(dir)) {
            return true;
        }

        self.matcher
            .matched_path_or_any_parents(path.to_path(), is_dir)
            .is_ignore()
    }
}
