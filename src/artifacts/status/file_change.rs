use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// Report sections, in the order they are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Staged,
    Unstaged,
    Untracked,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Staged => "Changes to be committed:",
            Section::Unstaged => "Changes not staged for commit:",
            Section::Untracked => "Untracked files:",
        }
    }
}

/// How a path differs between the working tree, the index and the latest commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChange {
    StagedNew,
    StagedModified,
    UnstagedModified,
    UnstagedDeleted,
    Untracked,
}

impl FileChange {
    pub fn section(&self) -> Section {
        match self {
            FileChange::StagedNew | FileChange::StagedModified => Section::Staged,
            FileChange::UnstagedModified | FileChange::UnstagedDeleted => Section::Unstaged,
            FileChange::Untracked => Section::Untracked,
        }
    }

    /// Two-column code used by `status --porcelain`
    pub fn porcelain_code(&self) -> &'static str {
        match self {
            FileChange::StagedNew => "A ",
            FileChange::StagedModified => "M ",
            FileChange::UnstagedModified => " M",
            FileChange::UnstagedDeleted => " D",
            FileChange::Untracked => "??",
        }
    }
}

impl From<&FileChange> for &str {
    fn from(change: &FileChange) -> Self {
        match change {
            FileChange::StagedNew => "new file:   ",
            FileChange::StagedModified | FileChange::UnstagedModified => "modified:   ",
            FileChange::UnstagedDeleted => "deleted:    ",
            FileChange::Untracked => "",
        }
    }
}

/// Indented label of the long format, colored by section
impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        let colored_label = match self.section() {
            Section::Staged => label.green(),
            Section::Unstaged | Section::Untracked => label.red(),
        };
        write!(f, "{:>width$}{}", "", colored_label, width = LABEL_WIDTH)
    }
}
