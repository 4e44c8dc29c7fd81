use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, Edit, Hunk, MyersDiff};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::repo_path::RepoPath;
use colored::Colorize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub ignore_whitespace: bool,
    /// Files or directories to compare; empty means every known path
    pub paths: Vec<String>,
}

impl Repository {
    /// Compare the working tree with the latest commit.
    pub fn diff(&self, opts: &DiffOptions) -> anyhow::Result<()> {
        self.load_state()?;

        let latest = self.commit_log().latest().cloned();
        let paths = self.diff_paths(opts, latest.as_ref());

        let mut had_differences = false;
        for path in &paths {
            let a = DiffTarget::from_commit(path, latest.as_ref(), self.database())?;
            let b = match DiffTarget::from_file(path, self.workspace()) {
                Ok(target) => target,
                Err(e) => {
                    log::warn!("skipping {path}: {e:#}");
                    continue;
                }
            };

            had_differences |= self.print_diff(&a, &b, opts.ignore_whitespace)?;
        }

        if !had_differences {
            writeln!(self.writer(), "No differences found.")?;
        }

        Ok(())
    }

    fn diff_paths(&self, opts: &DiffOptions, latest: Option<&Commit>) -> BTreeSet<RepoPath> {
        let mut known = self.workspace().list_files(self.ignore_rules());
        if let Some(commit) = latest {
            known.extend(commit.files().keys().cloned());
        }
        known.extend(self.index().entries().keys().cloned());

        if opts.paths.is_empty() {
            return known;
        }

        let mut prefixes = Vec::new();
        for raw in &opts.paths {
            let requested = self.workspace().path().join(raw);
            let requested = requested.canonicalize().unwrap_or(requested);

            if requested == self.workspace().path() {
                return known;
            }

            match self.workspace().normalize(&requested) {
                Some(prefix) => prefixes.push(prefix),
                None => log::warn!("{raw} is outside the repository"),
            }
        }

        known
            .into_iter()
            .filter(|path| prefixes.iter().any(|prefix| is_same_or_inside(path, prefix)))
            .collect()
    }

    /// Print the diff of one file. Returns whether the two sides differ.
    fn print_diff(
        &self,
        a: &DiffTarget,
        b: &DiffTarget,
        ignore_whitespace: bool,
    ) -> anyhow::Result<bool> {
        if !a.exists() && !b.exists() {
            return Ok(false);
        }

        if a.binary || b.binary {
            if a.oid == b.oid {
                return Ok(false);
            }

            self.print_diff_header(a, b)?;
            writeln!(
                self.writer(),
                "Binary files {} and {} differ",
                a.diff_path("a"),
                b.diff_path("b")
            )?;
            return Ok(true);
        }

        let (a_lines, b_lines) = (a.lines(ignore_whitespace), b.lines(ignore_whitespace));
        let hunks = MyersDiff::new(&a_lines, &b_lines).hunks();

        if hunks.is_empty() && a.exists() == b.exists() {
            return Ok(false);
        }

        self.print_diff_header(a, b)?;
        writeln!(self.writer(), "{}", format!("--- {}", a.diff_path("a")).bold())?;
        writeln!(self.writer(), "{}", format!("+++ {}", b.diff_path("b")).bold())?;

        for hunk in &hunks {
            self.print_diff_hunk(hunk)?;
        }

        Ok(true)
    }

    fn print_diff_header(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("diff --git a/{} b/{}", a.file, b.file).bold()
        )?;

        Ok(())
    }

    fn print_diff_hunk(&self, hunk: &Hunk<String>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", hunk.header().cyan())?;

        for edit in hunk.edits() {
            let line = edit.to_string();
            match edit {
                Edit::Delete { .. } => writeln!(self.writer(), "{}", line.red())?,
                Edit::Insert { .. } => writeln!(self.writer(), "{}", line.green())?,
                Edit::Equal { .. } => writeln!(self.writer(), "{line}")?,
            }
        }

        Ok(())
    }
}

fn is_same_or_inside(path: &RepoPath, prefix: &RepoPath) -> bool {
    path == prefix
        || path
            .as_str()
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}
