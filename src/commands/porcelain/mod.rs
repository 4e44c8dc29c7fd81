//! User-facing commands
//!
//! - `init`: create the `.gitter` directory
//! - `add`: stage files, directories and patterns
//! - `status`: show staged, unstaged and untracked changes
//! - `commit`: record a snapshot
//! - `log`: show the commit history
//! - `diff`: compare the working tree with the latest commit

pub mod add;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;
