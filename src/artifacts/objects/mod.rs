//! Content objects and identity keys
//!
//! - **Blob**: raw file content, stored in the object database
//! - **Commit**: full path → digest snapshot with message and timestamp, kept in the commit log
//! - **ObjectId**: SHA-1 digest identifying content
//! - **RepoPath**: canonical repository-relative path used as a key everywhere

pub mod blob;
pub mod commit;
pub mod object_id;
pub mod repo_path;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Number of leading hex characters used as the object directory name
pub const OBJECT_ID_PREFIX_LENGTH: usize = 2;

/// Length of an abbreviated object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
