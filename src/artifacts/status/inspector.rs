use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;
use crate::artifacts::status::file_change::FileChange;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl<'r> Inspector<'r> {
    /// Digest of the working copy; unreadable files count as absent.
    pub fn working_digest(&self, path: &RepoPath) -> Option<ObjectId> {
        match self.workspace.current_digest(path) {
            Ok(oid) => oid,
            Err(e) => {
                log::warn!("skipping {path}: {e:#}");
                None
            }
        }
    }

    /// Three-way classification of one path.
    ///
    /// Staged changes take precedence. A working change is only reported
    /// while the index holds nothing newer than the commit for that path.
    pub fn classify(
        working: Option<&ObjectId>,
        staged: Option<&ObjectId>,
        committed: Option<&ObjectId>,
    ) -> Option<FileChange> {
        match (working, staged, committed) {
            (_, Some(_), None) => Some(FileChange::StagedNew),
            (_, Some(staged), Some(committed)) if staged != committed => {
                Some(FileChange::StagedModified)
            }
            (Some(working), _, Some(committed)) if working != committed => {
                Some(FileChange::UnstagedModified)
            }
            (None, None, Some(_)) => Some(FileChange::UnstagedDeleted),
            (Some(_), None, None) => Some(FileChange::Untracked),
            _ => None,
        }
    }
}
