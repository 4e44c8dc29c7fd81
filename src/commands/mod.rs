//! Command implementations
//!
//! Each command is an `impl Repository` block under `porcelain`; `main`
//! resolves the subcommand once and calls into it.

pub mod porcelain;
