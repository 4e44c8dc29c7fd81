//! Repository storage areas
//!
//! - `commit_log`: append-only commit history (`.gitter/commits`)
//! - `database`: content-addressable object store (`.gitter/objects`)
//! - `index`: staging area (`.gitter/index`)
//! - `repository`: ties the areas to one repository root
//! - `workspace`: the working tree
//! - `state_file`: locked reads and writes shared by the JSON state files

pub(crate) mod commit_log;
pub(crate) mod database;
pub(crate) mod index;
pub mod repository;
mod state_file;
pub(crate) mod workspace;
