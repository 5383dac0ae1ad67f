// SPDX-License-Identifier: MIT

//! Post-commit automation.
//!
//! Classifies the most recent commit message and conditionally triggers
//! the version-bump and changelog collaborators. Both are opaque
//! executables; only their exit status matters, and a nonzero status is
//! fatal to the hook.

use crate::config::CollaboratorsConfig;
use crate::error::{CollaboratorError, GateError, Result};
use crate::git::Repository;
use crate::message::ConventionalType;
use std::path::Path;
use std::process::Command;

/// What a post-commit run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationOutcome {
    /// The commit did not classify; nothing ran.
    Skipped,
    /// Collaborators ran for a classified commit.
    Completed {
        kind: ConventionalType,
        bumped: bool,
    },
}

/// Runs the bookkeeping collaborators after a commit.
pub struct PostCommitAutomator {
    config: CollaboratorsConfig,
}

impl PostCommitAutomator {
    /// Create an automator from configuration.
    pub fn with_config(config: &CollaboratorsConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Classify the last commit and run the collaborators it warrants.
    pub fn run(&self, repo: &Repository) -> Result<AutomationOutcome> {
        let message = repo.last_commit_message()?;
        let first_line = message.lines().next().unwrap_or("");

        let kind = match ConventionalType::classify(first_line) {
            Some(kind) => kind,
            None => {
                tracing::debug!("Last commit is not conventional; nothing to automate");
                return Ok(AutomationOutcome::Skipped);
            }
        };

        let short = repo.head_short_hash().unwrap_or_default();
        let (_, committed) = repo.head_commit_dates()?;
        tracing::info!(
            "Automating for {} commit {} ({}), latest tag: {}",
            kind,
            short,
            committed.format("%Y-%m-%d %H:%M:%S"),
            repo.latest_tag().unwrap_or_else(|| "none".to_string())
        );

        // bump-triggering types bump first
        let bumped = kind.triggers_bump();
        if bumped {
            run_script(repo.workdir(), &self.config.version_script, &["bump"])?;
        }

        run_script(repo.workdir(), &self.config.changelog_script, &[])?;

        Ok(AutomationOutcome::Completed { kind, bumped })
    }
}

/// Invoke a collaborator script and check its exit status.
fn run_script(workdir: &Path, script: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(workdir.join(script))
        .args(args)
        .current_dir(workdir)
        .status()
        .map_err(|e| {
            GateError::Collaborator(CollaboratorError::LaunchFailed {
                name: script.to_string(),
                message: e.to_string(),
            })
        })?;

    if !status.success() {
        return Err(GateError::Collaborator(CollaboratorError::ScriptFailed {
            name: script.to_string(),
            status: status.code().unwrap_or(-1),
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn commit(dir: &Path, message: &str) {
        for args in [
            vec!["init"],
            vec!["config", "user.email", "t@example.com"],
            vec!["config", "user.name", "T"],
            vec!["add", "-A"],
            vec!["commit", "--allow-empty", "-m", message],
        ] {
            Command::new("git")
                .args(&args)
                .current_dir(dir)
                .output()
                .unwrap();
        }
    }

    fn write_script(dir: &Path, name: &str, marker: &str, exit: i32) {
        let path = dir.join(name);
        fs::write(
            &path,
            format!("#!/bin/sh\necho \"$@\" >> {}\nexit {}\n", marker, exit),
        )
        .unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    fn setup(message: &str) -> (TempDir, Repository, PostCommitAutomator) {
        let dir = TempDir::new().unwrap();
        write_script(dir.path(), "bump.sh", "bump.log", 0);
        write_script(dir.path(), "changelog.sh", "changelog.log", 0);
        commit(dir.path(), message);

        let config = CollaboratorsConfig {
            version_script: "bump.sh".to_string(),
            changelog_script: "changelog.sh".to_string(),
        };
        let repo = Repository::open(dir.path()).unwrap();
        let automator = PostCommitAutomator::with_config(&config);
        (dir, repo, automator)
    }

    #[test]
    fn test_fix_triggers_bump_and_changelog() {
        let (dir, repo, automator) = setup("fix: null check");
        let outcome = automator.run(&repo).unwrap();
        assert_eq!(
            outcome,
            AutomationOutcome::Completed {
                kind: ConventionalType::Fix,
                bumped: true
            }
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("bump.log")).unwrap().trim(),
            "bump"
        );
        assert!(dir.path().join("changelog.log").exists());
    }

    #[test]
    fn test_docs_triggers_only_changelog() {
        let (dir, repo, automator) = setup("docs: typo");
        let outcome = automator.run(&repo).unwrap();
        assert_eq!(
            outcome,
            AutomationOutcome::Completed {
                kind: ConventionalType::Docs,
                bumped: false
            }
        );
        assert!(!dir.path().join("bump.log").exists());
        assert!(dir.path().join("changelog.log").exists());
    }

    #[test]
    fn test_unclassified_triggers_nothing() {
        let (dir, repo, automator) = setup("random text with no prefix");
        let outcome = automator.run(&repo).unwrap();
        assert_eq!(outcome, AutomationOutcome::Skipped);
        assert!(!dir.path().join("bump.log").exists());
        assert!(!dir.path().join("changelog.log").exists());
    }

    #[test]
    fn test_failing_collaborator_is_fatal() {
        let (dir, repo, automator) = setup("feat: new thing");
        write_script(dir.path(), "bump.sh", "bump.log", 3);

        let err = automator.run(&repo).unwrap_err();
        assert!(err.to_string().contains("bump.sh"));
        // changelog never runs after the bump fails
        assert!(!dir.path().join("changelog.log").exists());
    }
}
