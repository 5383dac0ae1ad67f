// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GateError, GitError, Result};
use chrono::{DateTime, Utc};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with the operations the hooks need.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            GateError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GateError::Git(GitError::NotARepository)
            } else {
                GateError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                GateError::Git(GitError::OpenFailed {
                    message: "Repository has no working directory (bare repository)".to_string(),
                })
            })?
            .to_path_buf();

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get a reference to the inner git2 repository.
    pub fn inner(&self) -> &Git2Repo {
        &self.inner
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Get the hooks directory path.
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir().join("hooks")
    }

    /// Get the HEAD commit.
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.inner.head().map_err(|e| {
            GateError::Git(GitError::InvalidReference {
                reference: format!("HEAD: {}", e.message()),
            })
        })?;

        let commit = head.peel_to_commit().map_err(|e| {
            GateError::Git(GitError::InvalidReference {
                reference: format!("HEAD: {}", e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the full message of the most recent commit.
    pub fn last_commit_message(&self) -> Result<String> {
        let commit = self.head_commit()?;
        let message = commit.message().ok_or_else(|| {
            GateError::Git(GitError::InvalidReference {
                reference: "HEAD: invalid message encoding".to_string(),
            })
        })?;
        Ok(message.to_string())
    }

    /// Get the short hash of the HEAD commit.
    pub fn head_short_hash(&self) -> Result<String> {
        let obj = self.inner.revparse_single("HEAD").map_err(|e| {
            GateError::Git(GitError::InvalidReference {
                reference: format!("HEAD: {}", e.message()),
            })
        })?;
        let short = obj.short_id().map_err(|e| {
            GateError::Git(GitError::CommandFailed {
                command: "rev-parse --short".to_string(),
                message: e.message().to_string(),
            })
        })?;
        Ok(short.as_str().unwrap_or_default().to_string())
    }

    /// Get the author and committer timestamps of the HEAD commit.
    pub fn head_commit_dates(&self) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let commit = self.head_commit()?;
        let author = DateTime::from_timestamp(commit.author().when().seconds(), 0)
            .unwrap_or_else(Utc::now);
        let committer = DateTime::from_timestamp(commit.committer().when().seconds(), 0)
            .unwrap_or_else(Utc::now);
        Ok((author, committer))
    }

    /// Describe the latest tag reachable from HEAD, if any.
    pub fn latest_tag(&self) -> Option<String> {
        let mut opts = git2::DescribeOptions::new();
        opts.describe_tags();
        self.inner
            .describe(&opts)
            .ok()
            .and_then(|d| d.format(None).ok())
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use tempfile::TempDir;

    pub(crate) fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();

            let sig = repo.signature().unwrap();
            let tree_id = {
                let mut index = repo.index().unwrap();
                index.write_tree().unwrap()
            };
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "feat: initial commit", &tree, &[])
                .unwrap();
        }

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper)
    }

    #[test]
    fn test_open_repo() {
        let (dir, _repo) = create_test_repo();
        assert!(Repository::open(dir.path()).is_ok());
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(GateError::Git(crate::error::GitError::NotARepository))
        ));
    }

    #[test]
    fn test_last_commit_message() {
        let (_dir, repo) = create_test_repo();
        let message = repo.last_commit_message().unwrap();
        assert!(message.starts_with("feat: initial commit"));
    }

    #[test]
    fn test_head_short_hash() {
        let (_dir, repo) = create_test_repo();
        let hash = repo.head_short_hash().unwrap();
        assert!(!hash.is_empty());
        assert!(hash.len() < 40);
    }

    #[test]
    fn test_hooks_dir() {
        let (_dir, repo) = create_test_repo();
        assert!(repo.hooks_dir().ends_with("hooks"));
    }

    #[test]
    fn test_latest_tag_absent() {
        let (_dir, repo) = create_test_repo();
        assert!(repo.latest_tag().is_none());
    }
}
