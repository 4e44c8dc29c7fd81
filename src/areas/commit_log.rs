//! Append-only commit history
//!
//! `.gitter/commits` holds a JSON array of commit records, oldest first. New
//! commits are appended and the whole sequence is written back; records are
//! never edited or removed.
//!
//! `.gitter/HEAD` is written once at init as a symbolic pointer. Nothing reads
//! it back yet.

use crate::areas::state_file::{read_locked, write_locked};
use crate::artifacts::core::error::{RepositoryError, StateFile};
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::path::Path;

const HEAD_FILE: &str = "HEAD";
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone)]
pub struct CommitLog {
    /// Path to the commit log file (typically `.gitter/commits`)
    path: Box<Path>,
    commits: Vec<Commit>,
}

impl CommitLog {
    pub fn new(path: Box<Path>) -> Self {
        CommitLog {
            path,
            commits: Vec::new(),
        }
    }

    /// Load the history from disk, replacing the in-memory sequence.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.commits.clear();

        let Some(content) = read_locked(&self.path)? else {
            return Ok(());
        };

        if content.trim_ascii().is_empty() {
            return Ok(());
        }

        match serde_json::from_slice::<Vec<Commit>>(&content) {
            Ok(commits) => {
                self.commits = commits;
                Ok(())
            }
            Err(source) => Err(RepositoryError::CorruptState {
                kind: StateFile::CommitLog,
                path: self.path.to_path_buf(),
                source,
            }
            .into()),
        }
    }

    /// Append a commit and persist the full sequence.
    pub fn append(&mut self, commit: Commit) -> anyhow::Result<()> {
        self.commits.push(commit);
        self.write_updates()
    }

    pub fn latest(&self) -> Option<&Commit> {
        self.commits.last()
    }

    /// Commits from oldest to newest
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let content = serde_json::to_vec_pretty(&self.commits)?;
        write_locked(&self.path, &content)
    }

    /// Write the symbolic HEAD pointer next to the log.
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        let head_path = self
            .path
            .parent()
            .context(format!("Invalid commit log path {}", self.path.display()))?
            .join(HEAD_FILE);

        std::fs::write(&head_path, format!("ref: refs/heads/{branch}\n"))
            .context(format!("Unable to write {}", head_path.display()))
    }
}
