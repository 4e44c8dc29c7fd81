//! Working tree status
//!
//! Every path in the working tree, the index or the latest commit is compared
//! three ways and placed in at most one category.
//!
//! - `file_change`: change categories and report sections
//! - `inspector`: per-path classification
//! - `status_info`: the report over all paths

pub mod file_change;
pub mod inspector;
pub mod status_info;
