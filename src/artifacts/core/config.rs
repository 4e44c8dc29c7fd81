//! Process configuration read from the environment
//!
//! - `GITTER_AUTHOR_NAME`: author recorded in new commits (default `user`)
//! - `GITTER_AUTHOR_DATE`: fixed commit timestamp, `%Y-%m-%d %H:%M:%S`
//! - `NO_PAGER`: never page `log`/`diff` output
//! - `NO_COLOR`: never color output
//!
//! Paging and color are also off whenever stdout is not a terminal.

use crate::artifacts::objects::commit::{DEFAULT_AUTHOR, TIMESTAMP_FORMAT};
use anyhow::Context;
use is_terminal::IsTerminal;

const AUTHOR_NAME_VAR: &str = "GITTER_AUTHOR_NAME";
const AUTHOR_DATE_VAR: &str = "GITTER_AUTHOR_DATE";
const NO_PAGER_VAR: &str = "NO_PAGER";
const NO_COLOR_VAR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    author_name: String,
    author_date: Option<chrono::NaiveDateTime>,
    pager: bool,
    color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            author_name: DEFAULT_AUTHOR.to_string(),
            author_date: None,
            pager: false,
            color: false,
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let author_name = std::env::var(AUTHOR_NAME_VAR)
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let author_date = std::env::var(AUTHOR_DATE_VAR)
            .ok()
            .map(|raw| {
                chrono::NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
                    .with_context(|| format!("{AUTHOR_DATE_VAR} must look like 2024-01-31 12:00:00"))
            })
            .transpose()?;

        let terminal = std::io::stdout().is_terminal();
        let pager = terminal && std::env::var_os(NO_PAGER_VAR).is_none();
        let color = terminal && std::env::var_os(NO_COLOR_VAR).is_none();

        Ok(Config {
            author_name,
            author_date,
            pager,
            color,
        })
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn pager(&self) -> bool {
        self.pager
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Timestamp for a new commit: the configured date, or the local time now.
    pub fn commit_timestamp(&self) -> String {
        match self.author_date {
            Some(date) => date.format(TIMESTAMP_FORMAT).to_string(),
            None => chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
