//! Commit record
//!
//! A commit is a full snapshot of the tracked paths at the time it was made,
//! together with its message, a timestamp and the author name.
//!
//! ## Identity
//!
//! The commit hash is the SHA-1 of:
//! ```text
//! <message>\n
//! <timestamp>\n
//! <path> <digest>\n      (one line per file, sorted by path)
//! ```
//! so commits with the same snapshot, message and timestamp share a hash while
//! differing snapshots never do. The author is not part of the identity.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format of commit timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Author recorded for commits written before authors were stored
pub const DEFAULT_AUTHOR: &str = "user";

pub type Snapshot = BTreeMap<RepoPath, ObjectId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    hash: ObjectId,
    message: String,
    timestamp: String,
    #[serde(default = "default_author")]
    author: String,
    files: Snapshot,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl Commit {
    /// Build a commit and derive its hash from the message, timestamp and snapshot.
    pub fn new(message: String, timestamp: String, author: String, files: Snapshot) -> Self {
        let hash = ObjectId::digest(&hash_input(&message, &timestamp, &files));

        Commit {
            hash,
            message,
            timestamp,
            author,
            files,
        }
    }

    pub fn hash(&self) -> &ObjectId {
        &self.hash
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn files(&self) -> &Snapshot {
        &self.files
    }

    pub fn file(&self, path: &RepoPath) -> Option<&ObjectId> {
        self.files.get(path)
    }
}

fn hash_input(message: &str, timestamp: &str, files: &Snapshot) -> Vec<u8> {
    let mut input = format!("{message}\n{timestamp}\n");

    // BTreeMap iteration is already sorted by path
    for (path, oid) in files {
        input.push_str(&format!("{path} {oid}\n"));
    }

    input.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::path::Path;

    fn path(raw: &str) -> RepoPath {
        RepoPath::from_relative(Path::new(raw)).unwrap()
    }

    #[fixture]
    fn snapshot() -> Snapshot {
        BTreeMap::from([
            (path("b.txt"), ObjectId::digest(b"b")),
            (path("a.txt"), ObjectId::digest(b"a")),
        ])
    }

    #[test]
    fn hash_covers_message_timestamp_and_files() {
        let commit = Commit::new(
            "first".to_string(),
            "2023-01-01 12:00:00".to_string(),
            DEFAULT_AUTHOR.to_string(),
            Snapshot::from([(path("f.txt"), ObjectId::digest(b"hello"))]),
        );

        assert_eq!(
            commit.hash().as_ref(),
            "f6b8c10c08bb6f1285c32d16dbfdc63751a56aad"
        );
    }

    #[rstest]
    fn identical_inputs_collide(snapshot: Snapshot) {
        let a = Commit::new("m".into(), "t".into(), "x".into(), snapshot.clone());
        let b = Commit::new("m".into(), "t".into(), "y".into(), snapshot);

        assert_eq!(a.hash(), b.hash());
    }

    #[rstest]
    fn differing_snapshots_never_collide(snapshot: Snapshot) {
        let mut other = snapshot.clone();
        other.insert(path("c.txt"), ObjectId::digest(b"c"));

        let a = Commit::new("m".into(), "t".into(), "u".into(), snapshot);
        let b = Commit::new("m".into(), "t".into(), "u".into(), other);

        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn missing_author_defaults_when_deserializing() {
        let raw = r#"{
            "hash": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
            "message": "first",
            "timestamp": "2024-01-01 12:00:00",
            "files": { "f.txt": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d" }
        }"#;

        let commit: Commit = serde_json::from_str(raw).unwrap();
        assert_eq!(commit.author(), DEFAULT_AUTHOR);
        assert_eq!(commit.files().len(), 1);
    }

    #[test]
    fn short_message_is_the_first_line() {
        let commit = Commit::new(
            "First line\nSecond line".into(),
            "t".into(),
            "u".into(),
            Snapshot::new(),
        );
        assert_eq!(commit.short_message(), "First line");
    }
}
