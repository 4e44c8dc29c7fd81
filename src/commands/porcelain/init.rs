use crate::areas::commit_log::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(self.writer(), "Gitter repository already initialized.")?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitter/objects directory")?;

        self.index()
            .write_updates()
            .context("Failed to create .gitter/index file")?;

        let commit_log = self.commit_log();
        commit_log
            .write_updates()
            .context("Failed to create .gitter/commits file")?;
        commit_log
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        log::debug!("initialized repository at {}", self.path().display());
        writeln!(
            self.writer(),
            "Initialized empty Gitter repository in {}/",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
