use crate::areas::index::{Index, IndexEntries};
use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;
use std::collections::BTreeSet;

impl Repository {
    /// Record the latest snapshot overlaid with the index as a new commit.
    ///
    /// With `all`, tracked files that changed in the working tree are staged
    /// first and tracked files that were deleted are left out of the snapshot.
    pub fn commit(&mut self, messages: &[String], all: bool) -> anyhow::Result<()> {
        let message = messages.join("\n");
        if message.trim().is_empty() {
            return Err(RepositoryError::MissingMessage.into());
        }

        self.load_state_strict()?;

        let latest = self.commit_log().latest().cloned();
        let mut index = self.index();

        let removed = if all {
            self.stage_tracked_changes(&mut index, latest.as_ref())
        } else {
            BTreeSet::new()
        };

        let mut files = pending_snapshot(latest.as_ref(), index.entries());
        files.retain(|path, _| !removed.contains(path));

        let unchanged = match latest.as_ref() {
            Some(commit) => commit.files() == &files,
            None => files.is_empty(),
        };
        if unchanged {
            writeln!(self.writer(), "No changes to commit.")?;
            return Ok(());
        }

        self.store_staged_objects(index.entries(), &files)?;

        let commit = Commit::new(
            message,
            self.config().commit_timestamp(),
            self.config().author_name().to_string(),
            files,
        );
        let hash = commit.hash().clone();

        self.commit_log().append(commit)?;
        index.clear();
        index.write_updates()?;

        log::debug!("recorded commit {hash}");
        writeln!(self.writer(), "Committed with hash: {hash}")?;

        Ok(())
    }

    /// Stage every tracked file whose working copy changed.
    ///
    /// Returns the tracked paths that no longer exist in the working tree.
    fn stage_tracked_changes(&self, index: &mut Index, latest: Option<&Commit>) -> BTreeSet<RepoPath> {
        let mut tracked = index.entries().keys().cloned().collect::<BTreeSet<_>>();
        if let Some(commit) = latest {
            tracked.extend(commit.files().keys().cloned());
        }

        let mut removed = BTreeSet::new();
        for path in tracked {
            match self.workspace().current_digest(&path) {
                Ok(Some(oid)) => {
                    let committed = latest.and_then(|commit| commit.file(&path));
                    if index.entry_by_path(&path).is_some() || committed != Some(&oid) {
                        index.upsert(path, oid);
                    }
                }
                Ok(None) => {
                    removed.insert(path);
                }
                Err(e) => log::warn!("skipping {path}: {e:#}"),
            }
        }

        removed
    }

    /// Copy the staged content of each entry recorded in `files` into the
    /// object store.
    ///
    /// Content that changed after it was staged cannot be recovered; such
    /// entries are reported and left without an object.
    fn store_staged_objects(&self, staged: &IndexEntries, files: &Snapshot) -> anyhow::Result<()> {
        for (path, oid) in staged {
            if !files.contains_key(path) || self.database().contains(oid) {
                continue;
            }

            let content = match self.workspace().read_file(path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("skipping {path}: {e:#}");
                    self.warn(&format!("{path} is missing; its staged content was not stored."))?;
                    continue;
                }
            };

            if ObjectId::digest(&content) != *oid {
                self.warn(&format!(
                    "{path} changed after it was staged; its staged content was not stored."
                ))?;
                continue;
            }

            self.database().store(oid, &content)?;
        }

        Ok(())
    }
}

/// The latest snapshot with the staged entries laid over it
fn pending_snapshot(latest: Option<&Commit>, staged: &IndexEntries) -> Snapshot {
    let mut files = latest.map(|commit| commit.files().clone()).unwrap_or_default();
    files.extend(staged.iter().map(|(path, oid)| (path.clone(), oid.clone())));
    files
}
