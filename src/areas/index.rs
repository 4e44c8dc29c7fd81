//! Staging area
//!
//! The index records which content each path will have in the next commit. It
//! only holds what has been staged since the last commit: `add` upserts
//! entries and a successful `commit` clears it.
//!
//! ## File Format
//!
//! `.gitter/index` is a JSON object mapping repository paths to digests:
//!
//! ```json
//! {
//!   "src/main.rs": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
//! }
//! ```
//!
//! An absent file is an empty index. A file that fails to parse is reported
//! as [`RepositoryError::CorruptState`] and the index is left empty.

use crate::areas::state_file::{read_locked, write_locked};
use crate::artifacts::core::error::{RepositoryError, StateFile};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;
use std::collections::BTreeMap;
use std::path::Path;

pub type IndexEntries = BTreeMap<RepoPath, ObjectId>;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitter/index`)
    path: Box<Path>,
    /// Staged digests mapped by path
    entries: IndexEntries,
    /// Whether the entries differ from what was last loaded or written
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn entry_by_path(&self, path: &RepoPath) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &IndexEntries {
        &self.entries
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Load the index from disk, replacing the in-memory entries.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        let Some(content) = read_locked(&self.path)? else {
            return Ok(());
        };

        if content.trim_ascii().is_empty() {
            return Ok(());
        }

        match serde_json::from_slice::<IndexEntries>(&content) {
            Ok(entries) => {
                self.entries = entries;
                Ok(())
            }
            Err(source) => Err(RepositoryError::CorruptState {
                kind: StateFile::Index,
                path: self.path.to_path_buf(),
                source,
            }
            .into()),
        }
    }

    /// Stage `oid` for `path`.
    ///
    /// Returns `true` if the path was not staged yet or was staged with a
    /// different digest; re-staging identical content changes nothing.
    pub fn upsert(&mut self, path: RepoPath, oid: ObjectId) -> bool {
        if self.entries.get(&path) == Some(&oid) {
            return false;
        }

        self.entries.insert(path, oid);
        self.changed = true;

        true
    }

    /// Drop every staged entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let content = serde_json::to_vec_pretty(&self.entries)?;
        write_locked(&self.path, &content)?;
        self.changed = false;

        Ok(())
    }
}
