use crate::areas::repository::Repository;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::repo_path::RepoPath;

impl Repository {
    /// Stage files, directories and patterns named by `inputs`.
    ///
    /// Inputs that match nothing are reported together as one warning. A file
    /// whose content is already staged, or already committed and not staged
    /// since, is not a new change.
    pub fn add(&mut self, inputs: &[String]) -> anyhow::Result<()> {
        if inputs.is_empty() {
            return Err(RepositoryError::NoPathsGiven.into());
        }

        self.load_state()?;

        let expanded = self.workspace().expand_inputs(inputs, self.ignore_rules());

        if expanded.files.is_empty() {
            return Err(RepositoryError::NoValidFiles {
                paths: inputs.to_vec(),
            }
            .into());
        }

        let latest = self.commit_log().latest().cloned();
        let mut index = self.index();
        let mut newly_staged = Vec::<RepoPath>::new();

        for path in expanded.files {
            let oid = match self.workspace().current_digest(&path) {
                Ok(Some(oid)) => oid,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("skipping {path}: {e:#}");
                    continue;
                }
            };

            let committed = latest.as_ref().and_then(|commit| commit.file(&path));
            if index.entry_by_path(&path).is_none() && committed == Some(&oid) {
                continue;
            }

            if index.upsert(path.clone(), oid) {
                log::debug!("staged {path}");
                newly_staged.push(path);
            }
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        if newly_staged.is_empty() {
            writeln!(self.writer(), "No new changes detected. Nothing to add.")?;
        } else {
            let names = newly_staged
                .iter()
                .map(RepoPath::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.writer(), "Files successfully added to index: {names}")?;
        }

        if !expanded.missing.is_empty() {
            self.warn(
                &RepositoryError::MissingInput {
                    paths: expanded.missing,
                }
                .to_string(),
            )?;
        }

        Ok(())
    }
}
