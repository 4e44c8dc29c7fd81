//! A minimal version-control core
//!
//! Tracks file snapshots across the working tree, a staging area and an
//! append-only commit history, stored under `.gitter/` at the repository
//! root.
//!
//! - `areas`: on-disk state (objects, index, commit log) and the working tree
//! - `artifacts`: digests, commits, status classification and line diffs
//! - `commands`: the user-facing commands as `Repository` methods

pub mod areas;
pub mod artifacts;
pub mod commands;
