use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::repo_path::RepoPath;

const NULL_PATH: &str = "/dev/null";

pub type LineSet = Vec<String>;

/// One side of a file diff: the content of a path at some point, if it existed
#[derive(Debug, Clone)]
pub struct DiffTarget {
    pub(crate) file: RepoPath,
    pub(crate) oid: Option<ObjectId>,
    pub(crate) data: LineSet,
    pub(crate) binary: bool,
}

impl DiffTarget {
    /// The path as recorded in `commit`.
    ///
    /// A path the commit does not hold, or whose object is missing from the
    /// store, is treated as not existing at that point.
    pub fn from_commit(
        file: &RepoPath,
        commit: Option<&Commit>,
        database: &Database,
    ) -> anyhow::Result<Self> {
        let Some(oid) = commit.and_then(|commit| commit.file(file)) else {
            return Ok(Self::from_nothing(file));
        };

        match database.parse_object_as_blob(oid)? {
            Some(blob) => Ok(Self::from_blob(file, oid.clone(), &blob)),
            None => {
                log::warn!("object {oid} for {file} is missing from the store");
                Ok(Self::from_nothing(file))
            }
        }
    }

    /// The path as it is in the working tree now.
    pub fn from_file(file: &RepoPath, workspace: &Workspace) -> anyhow::Result<Self> {
        if !workspace.file_path(file).is_file() {
            return Ok(Self::from_nothing(file));
        }

        let blob = workspace.parse_blob(file)?;
        let oid = ObjectId::digest(blob.content());

        Ok(Self::from_blob(file, oid, &blob))
    }

    pub fn from_nothing(file: &RepoPath) -> Self {
        Self {
            file: file.clone(),
            oid: None,
            data: Vec::new(),
            binary: false,
        }
    }

    fn from_blob(file: &RepoPath, oid: ObjectId, blob: &Blob) -> Self {
        Self {
            file: file.clone(),
            oid: Some(oid),
            data: blob.lines(),
            binary: blob.is_binary(),
        }
    }

    pub fn exists(&self) -> bool {
        self.oid.is_some()
    }

    /// `<prefix>/<path>`, or `/dev/null` when the file does not exist
    pub fn diff_path(&self, prefix: &str) -> String {
        if self.exists() {
            format!("{prefix}/{}", self.file)
        } else {
            NULL_PATH.to_string()
        }
    }

    /// Lines to compare, optionally with whitespace runs collapsed and blank
    /// lines dropped.
    pub fn lines(&self, ignore_whitespace: bool) -> LineSet {
        if !ignore_whitespace {
            return self.data.clone();
        }

        self.data
            .iter()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect()
    }
}
