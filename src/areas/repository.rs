use crate::areas::commit_log::CommitLog;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::ignore::{IgnoreRules, METADATA_DIR};
use crate::artifacts::status::status_info::Status;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "index";
const COMMITS_FILE: &str = "commits";
const OBJECTS_DIR: &str = "objects";

/// A working tree and its `.gitter` metadata
///
/// Every path the repository touches is derived from the root it was opened
/// with. Output goes to the writer it was given, never straight to stdout.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    commit_log: RefCell<CommitLog>,
    database: Database,
    workspace: Workspace,
    ignore_rules: IgnoreRules,
    config: Config,
}

impl Repository {
    /// Open the repository rooted at `path`, which must be an existing directory.
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .context(format!("Unable to resolve {}", path.display()))?;
        let metadata_path = path.join(METADATA_DIR);

        let index = Index::new(metadata_path.join(INDEX_FILE).into_boxed_path());
        let commit_log = CommitLog::new(metadata_path.join(COMMITS_FILE).into_boxed_path());
        let database = Database::new(metadata_path.join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let ignore_rules = IgnoreRules::load(&path)?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            commit_log: RefCell::new(commit_log),
            database,
            workspace,
            ignore_rules,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn commit_log(&'_ self) -> RefMut<'_, CommitLog> {
        self.commit_log.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore_rules
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// Fail with [`RepositoryError::NotInitialized`] unless `.gitter` exists.
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        Err(RepositoryError::NotInitialized {
            path: self.metadata_path(),
        }
        .into())
    }

    /// Load the index and the commit log from disk.
    ///
    /// A corrupt state file is reported as a warning and treated as empty.
    pub fn load_state(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index_loaded = self.index().rehydrate();
        self.recover_corrupt_state(index_loaded)?;

        let log_loaded = self.commit_log().rehydrate();
        self.recover_corrupt_state(log_loaded)
    }

    /// Load the index and the commit log, failing on a corrupt state file.
    ///
    /// Used before rewriting the commit log, where an empty fallback would
    /// replace the recorded history.
    pub fn load_state_strict(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.index().rehydrate()?;
        self.commit_log().rehydrate()
    }

    fn recover_corrupt_state(&self, loaded: anyhow::Result<()>) -> anyhow::Result<()> {
        let Err(error) = loaded else {
            return Ok(());
        };

        if !matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::CorruptState { .. })
        ) {
            return Err(error);
        }

        log::warn!("{error}");
        self.warn(&format!("{error}; treating it as empty"))
    }

    /// Write a non-fatal `Warning:` line to the output.
    pub fn warn(&self, message: &str) -> anyhow::Result<()> {
        writeln!(self.writer(), "Warning: {message}")?;
        Ok(())
    }
}
