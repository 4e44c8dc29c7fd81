use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;
use anyhow::Context;
use bytes::Bytes;
use ignore::gitignore::GitignoreBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub type FileSet = BTreeSet<RepoPath>;

/// Files named on the command line, resolved against the working tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedInputs {
    pub files: FileSet,
    /// Inputs that are neither an existing path nor a pattern matching a file
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The canonical key for an absolute path inside the working tree.
    pub fn normalize(&self, path: &Path) -> Option<RepoPath> {
        RepoPath::from_absolute(&self.path, path)
    }

    /// Every non-ignored file in the working tree.
    pub fn list_files(&self, rules: &IgnoreRules) -> FileSet {
        self.walk_files(&self.path, rules)
    }

    /// Resolve user inputs (relative to the repository root) into files.
    ///
    /// Directories expand recursively, existing files are taken as is, and
    /// anything else is tried as a gitignore-style pattern over the working
    /// tree. Inputs that resolve to nothing are collected in `missing`.
    pub fn expand_inputs(&self, inputs: &[String], rules: &IgnoreRules) -> ExpandedInputs {
        let mut expanded = ExpandedInputs::default();

        for input in inputs {
            let candidate = self.path.join(input);

            if candidate.is_dir() {
                let root = std::fs::canonicalize(&candidate).unwrap_or(candidate);
                expanded.files.extend(self.walk_files(&root, rules));
            } else if candidate.is_file() {
                let resolved = std::fs::canonicalize(&candidate).unwrap_or(candidate);
                match self.normalize(&resolved) {
                    Some(path) if !rules.is_ignored(&path, false) => {
                        expanded.files.insert(path);
                    }
                    Some(path) => log::debug!("skipping ignored input {path}"),
                    None => expanded.missing.push(input.clone()),
                }
            } else {
                let matches = self.match_pattern(input, rules);
                if matches.is_empty() {
                    expanded.missing.push(input.clone());
                } else {
                    expanded.files.extend(matches);
                }
            }
        }

        expanded
    }

    fn match_pattern(&self, pattern: &str, rules: &IgnoreRules) -> FileSet {
        let mut builder = GitignoreBuilder::new(&self.path);
        if let Err(e) = builder.add_line(None, pattern) {
            log::debug!("input {pattern} is not a valid pattern: {e}");
            return FileSet::new();
        }

        let matcher = match builder.build() {
            Ok(matcher) => matcher,
            Err(e) => {
                log::debug!("input {pattern} is not a valid pattern: {e}");
                return FileSet::new();
            }
        };

        self.list_files(rules)
            .into_iter()
            .filter(|path| matcher.matched(path.to_path(), false).is_ignore())
            .collect()
    }

    fn walk_files(&self, root: &Path, rules: &IgnoreRules) -> FileSet {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !self.is_ignored_dir(entry, rules))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() || entry.path().is_file())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path(), rules))
            .collect()
    }

    fn is_ignored_dir(&self, entry: &DirEntry, rules: &IgnoreRules) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }

        self.normalize(entry.path())
            .is_some_and(|path| rules.is_ignored(&path, true))
    }

    fn check_if_not_ignored_file_path(&self, path: &Path, rules: &IgnoreRules) -> Option<RepoPath> {
        self.normalize(path)
            .filter(|path| !rules.is_ignored(path, false))
    }

    pub fn file_path(&self, path: &RepoPath) -> PathBuf {
        self.path.join(path.to_path())
    }

    pub fn read_file(&self, path: &RepoPath) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(path);
        let content = std::fs::read(&file_path)
            .context(format!("Unable to read {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, path: &RepoPath) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(path)?))
    }

    /// Digest of the file as it is now, or `None` if it does not exist.
    pub fn current_digest(&self, path: &RepoPath) -> anyhow::Result<Option<ObjectId>> {
        let file_path = self.file_path(path);
        if !file_path.is_file() {
            return Ok(None);
        }

        let content = self.read_file(path)?;
        Ok(Some(ObjectId::digest(&content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn path(raw: &str) -> RepoPath {
        RepoPath::from_relative(Path::new(raw)).unwrap()
    }

    fn write(dir: &Path, relative: &str, content: &str) {
        let file = dir.join(relative);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, content).unwrap();
    }

    #[fixture]
    fn working_tree() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        write(dir.path(), "1.txt", "one");
        write(dir.path(), "a/2.txt", "two");
        write(dir.path(), "a/b/3.rs", "three");
        write(dir.path(), ".gitter/index", "{}");
        write(dir.path(), "cache.pyc", "bytecode");
        dir
    }

    fn workspace(dir: &TempDir) -> (Workspace, IgnoreRules) {
        let root = dir.path().canonicalize().unwrap();
        let rules = IgnoreRules::load(&root).unwrap();
        (Workspace::new(root.into_boxed_path()), rules)
    }

    #[rstest]
    fn lists_every_tracked_candidate(working_tree: TempDir) {
        let (workspace, rules) = workspace(&working_tree);

        let files = workspace.list_files(&rules);

        assert_eq!(
            files,
            FileSet::from([path("1.txt"), path("a/2.txt"), path("a/b/3.rs")])
        );
    }

    #[rstest]
    fn expands_files_directories_and_patterns(working_tree: TempDir) {
        let (workspace, rules) = workspace(&working_tree);
        let inputs = vec![
            "1.txt".to_string(),
            "a/b".to_string(),
            "*.txt".to_string(),
            "nope.md".to_string(),
        ];

        let expanded = workspace.expand_inputs(&inputs, &rules);

        assert_eq!(
            expanded.files,
            FileSet::from([path("1.txt"), path("a/2.txt"), path("a/b/3.rs")])
        );
        assert_eq!(expanded.missing, vec!["nope.md".to_string()]);
    }

    #[rstest]
    fn ignored_inputs_are_skipped_silently(working_tree: TempDir) {
        let (workspace, rules) = workspace(&working_tree);

        let expanded = workspace.expand_inputs(&["cache.pyc".to_string()], &rules);

        assert!(expanded.files.is_empty());
        assert!(expanded.missing.is_empty());
    }

    #[rstest]
    fn current_digest_of_a_missing_file_is_absent(working_tree: TempDir) {
        let (workspace, _) = workspace(&working_tree);

        assert_eq!(
            workspace.current_digest(&path("1.txt")).unwrap(),
            Some(ObjectId::digest(b"one"))
        );
        assert_eq!(workspace.current_digest(&path("gone.txt")).unwrap(), None);
    }
}
