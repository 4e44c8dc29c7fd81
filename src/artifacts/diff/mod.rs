//! Line diffs between two versions of a file
//!
//! - `diff_algorithm`: Myers' diff and grouping of edits into hunks
//! - `diff_target`: one side of a file diff (a commit, the working tree, or nothing)
//!
//! Content is compared line by line with terminators stripped. With
//! whitespace ignored, runs of whitespace collapse to one space and blank
//! lines are dropped on both sides before diffing.

pub mod diff_algorithm;
pub mod diff_target;
