use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::Section;
use crate::artifacts::status::status_info::StatusInfo;
use colored::Colorize;

const SECTIONS: [Section; 3] = [Section::Staged, Section::Unstaged, Section::Untracked];

impl Repository {
    pub fn status_report(&self) -> anyhow::Result<StatusInfo> {
        self.load_state()?;

        let index = self.index();
        let commit_log = self.commit_log();

        Ok(self.status().initialize(&index, commit_log.latest()))
    }

    pub fn show_status(&self, porcelain: bool) -> anyhow::Result<()> {
        let status_info = self.status_report()?;

        if porcelain {
            self.print_porcelain_format(&status_info)
        } else {
            self.print_long_format(&status_info)
        }
    }

    fn print_porcelain_format(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        for (path, change) in status_info.changes() {
            writeln!(self.writer(), "{} {}", change.porcelain_code(), path)?;
        }

        Ok(())
    }

    fn print_long_format(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        if status_info.is_clean() {
            writeln!(self.writer(), "No changes detected.")?;
            return Ok(());
        }

        let mut first_section = true;
        for section in SECTIONS {
            let mut changes = status_info.section(section).peekable();
            if changes.peek().is_none() {
                continue;
            }

            if !first_section {
                writeln!(self.writer())?;
            }
            first_section = false;

            writeln!(self.writer(), "{}", section.title())?;
            for (path, change) in changes {
                let path = match section {
                    Section::Staged => path.as_str().green(),
                    Section::Unstaged | Section::Untracked => path.as_str().red(),
                };
                writeln!(self.writer(), "{change}{path}")?;
            }
        }

        Ok(())
    }
}
