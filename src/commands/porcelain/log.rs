use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
}

impl Repository {
    /// Show the commit history, most recent first.
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        self.load_state()?;

        let commit_log = self.commit_log();
        if commit_log.is_empty() {
            writeln!(self.writer(), "No commits found.")?;
            return Ok(());
        }

        for commit in commit_log.commits().iter().rev() {
            self.display_commit(commit, opts)?;
        }

        Ok(())
    }

    pub fn display_commit(&self, commit: &Commit, opts: &LogOptions) -> anyhow::Result<()> {
        if opts.oneline {
            return self.show_commit_oneline(commit);
        }

        self.show_commit_medium(commit)?;
        writeln!(self.writer())?;

        Ok(())
    }

    fn show_commit_medium(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit.hash()).yellow()
        )?;
        writeln!(self.writer(), "Author: {}", commit.author())?;
        writeln!(self.writer(), "Date:   {}", commit.timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit.hash().to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
