use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::repo_path::RepoPath;
use crate::artifacts::status::file_change::{FileChange, Section};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<RepoPath, FileChange>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) changes: ChangeSet,
}

impl StatusInfo {
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }

    /// Paths of one section, in path order
    pub fn section(&self, section: Section) -> impl Iterator<Item = (&RepoPath, &FileChange)> {
        self.changes
            .iter()
            .filter(move |(_, change)| change.section() == section)
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    /// Classify every path known to the working tree, the index or `latest`.
    pub fn initialize(&self, index: &Index, latest: Option<&Commit>) -> StatusInfo {
        let workspace = self.repository.workspace();
        let ignore = self.repository.ignore_rules();
        let inspector = Inspector::new(workspace);

        let working_files = workspace.list_files(ignore);

        let mut paths = working_files.iter().collect::<BTreeSet<_>>();
        paths.extend(index.entries().keys());
        if let Some(commit) = latest {
            paths.extend(commit.files().keys());
        }

        let changes = paths
            .into_iter()
            .filter(|path| !ignore.is_ignored(path, false))
            .filter_map(|path| {
                let working = working_files
                    .contains(path)
                    .then(|| inspector.working_digest(path))
                    .flatten();
                let staged = index.entry_by_path(path);
                let committed = latest.and_then(|commit| commit.file(path));

                Inspector::classify(working.as_ref(), staged, committed)
                    .map(|change| (path.clone(), change))
            })
            .collect::<ChangeSet>();

        StatusInfo { changes }
    }
}
