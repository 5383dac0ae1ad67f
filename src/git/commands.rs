// SPDX-License-Identifier: MIT

//! Git command wrappers for the listing plumbing and staging.

use crate::error::{GateError, GitError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::repo::Repository;

/// Run a git command in the repository workdir and collect stdout.
fn git_output(repo: &Repository, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo.workdir())
        .output()
        .map_err(|e| {
            GateError::Git(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: e.to_string(),
            })
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GateError::Git(GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            message: stderr.trim().to_string(),
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a git command and split its stdout into non-empty lines.
fn git_lines(repo: &Repository, args: &[&str]) -> Result<Vec<String>> {
    Ok(git_output(repo, args)?
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect())
}

/// List staged paths (Added/Copied/Modified), repository-relative, in
/// listing order.
pub fn staged_files(repo: &Repository) -> Result<Vec<PathBuf>> {
    let lines = git_lines(
        repo,
        &["diff", "--cached", "--name-only", "--diff-filter=ACM"],
    )?;
    Ok(lines.into_iter().map(PathBuf::from).collect())
}

/// List all tracked paths, optionally restricted by a glob pattern.
pub fn tracked_files(repo: &Repository, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut args = vec!["ls-files"];
    if let Some(p) = pattern {
        args.push("--");
        args.push(p);
    }
    let lines = git_lines(repo, &args)?;
    Ok(lines.into_iter().map(PathBuf::from).collect())
}

/// List paths changed between two revisions.
pub fn changed_between(repo: &Repository, old: &str, new: &str) -> Result<Vec<PathBuf>> {
    let lines = git_lines(repo, &["diff", "--name-only", old, new])?;
    Ok(lines.into_iter().map(PathBuf::from).collect())
}

/// Get the full staged diff text, used as LLM context.
pub fn staged_diff_text(repo: &Repository) -> Result<String> {
    git_output(repo, &["diff", "--cached"])
}

/// Add a path to the staging index.
pub fn stage_path(repo: &Repository, path: &Path) -> Result<()> {
    let mut index = repo.inner().index().map_err(|e| {
        GateError::Git(GitError::CommandFailed {
            command: "index".to_string(),
            message: e.message().to_string(),
        })
    })?;

    // Make path relative to workdir
    let relative_path = if path.is_absolute() {
        path.strip_prefix(repo.workdir()).unwrap_or(path)
    } else {
        path
    };

    index.add_path(relative_path).map_err(|e| {
        GateError::Git(GitError::CommandFailed {
            command: format!("add {}", path.display()),
            message: e.message().to_string(),
        })
    })?;

    index.write().map_err(|e| {
        GateError::Git(GitError::CommandFailed {
            command: "write index".to_string(),
            message: e.message().to_string(),
        })
    })?;

    Ok(())
}
