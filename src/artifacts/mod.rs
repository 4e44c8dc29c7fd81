//! Data structures and algorithms
//!
//! - `core`: configuration, errors and the pager writer
//! - `diff`: Myers' line diff and diff sides
//! - `ignore`: ignore rules for the working tree
//! - `objects`: digests, paths, blobs and commits
//! - `status`: three-way working tree status

pub mod core;
pub mod diff;
pub mod ignore;
pub mod objects;
pub mod status;
