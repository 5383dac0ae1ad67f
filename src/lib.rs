// SPDX-License-Identifier: MIT

//! commitgate - commit quality gates and auto-remediation for git hooks.
//!
//! # Features
//!
//! - **Secret Scanning**: A hard pre-commit gate over staged file contents
//! - **Style Auto-Fixer**: Heuristic textual repair passes with re-staging
//! - **Repository Normalization**: Line endings and executable permissions
//! - **Delegated Gates**: Lint and static analysis as pass/fail delegates
//! - **Message Validation**: Conventional-commit grammar with LLM suggestions
//! - **Post-Commit Automation**: Version bump and changelog collaborators
//! - **Hook Management**: Install, verify and self-heal the hook scripts
//!
//! # Example
//!
//! ```no_run
//! use commitgate::config::GateConfig;
//! use commitgate::git;
//! use commitgate::pipeline;
//!
//! let config = GateConfig::load().unwrap();
//! let repo = git::open_repo().unwrap();
//!
//! // Run the full pre-commit pipeline
//! pipeline::run_pre_commit(&config, &repo).unwrap();
//! ```

// Module declarations
pub mod automate;
pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod git;
pub mod hooks;
pub mod message;
pub mod normalize;
pub mod notify;
pub mod pipeline;
pub mod scan;
pub mod suggest;

// Re-exports for convenience
pub use config::GateConfig;
pub use error::{GateError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of commitgate.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
