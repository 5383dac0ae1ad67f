// SPDX-License-Identifier: MIT

//! Error types for the commitgate pipeline.
//!
//! The taxonomy mirrors the failure policies of the hooks: gate failures
//! abort the pipeline, collaborator failures are fatal only for the bump
//! and changelog scripts, per-file I/O problems are reported and skipped,
//! and install failures are aggregated per hook.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for commitgate operations.
#[derive(Error, Debug)]
pub enum GateError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Gate failures (pipeline aborts)
    #[error("{0}")]
    Gate(#[from] GateFailure),

    // External collaborator failures
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    // Hook install/verify failures
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// A check that failed and must stop the enclosing hook.
#[derive(Error, Debug)]
pub enum GateFailure {
    #[error("Secrets detected in staged files: {count} finding(s)")]
    SecretsFound { count: usize },

    #[error("Lint gate failed (exit status {status})")]
    LintFailed { status: i32 },

    #[error("Static analysis gate failed (exit status {status})")]
    AnalysisFailed { status: i32 },

    #[error("Commit message does not follow the conventional format")]
    InvalidMessage,
}

/// External collaborator failures.
///
/// The LLM suggestion collaborator never surfaces here: it degrades to a
/// fallback message. Script collaborators are fatal on nonzero exit.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("Collaborator '{name}' exited with status {status}")]
    ScriptFailed { name: String, status: i32 },

    #[error("Failed to launch collaborator '{name}': {message}")]
    LaunchFailed { name: String, message: String },
}

/// Hook install and verification errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook not found: {hook}")]
    NotFound { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },

    #[error("Hook verification failed: {failed} of {total} hook(s) unhealthy")]
    VerificationFailed { failed: usize, total: usize },
}

/// Result type alias for commitgate operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GateError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_gate_failure_display() {
        let err = GateFailure::SecretsFound { count: 3 };
        assert!(err.to_string().contains("3"));

        let err = GateFailure::LintFailed { status: 2 };
        assert!(err.to_string().contains("exit status 2"));
    }

    #[test]
    fn test_gate_error_from_collaborator() {
        let inner = CollaboratorError::ScriptFailed {
            name: "bump_version".to_string(),
            status: 1,
        };
        let err: GateError = inner.into();
        assert!(err.to_string().contains("bump_version"));
    }

    #[test]
    fn test_context_extension() {
        let r: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = r.context("reading hook").unwrap_err();
        assert!(err.to_string().contains("reading hook"));
    }
}
