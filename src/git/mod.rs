// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Repository access goes through `git2` where the library API is a good
//! fit (discovery, index staging, commit metadata) and through the `git`
//! binary for the listing plumbing the hooks consume.

pub mod commands;
mod repo;

pub use commands::{
    changed_between, staged_diff_text, staged_files, stage_path, tracked_files,
};
pub use repo::{open_repo, Repository};
