// SPDX-License-Identifier: MIT

//! Repository normalization.
//!
//! Two independent, idempotent passes over all tracked files: CRLF line
//! endings become LF, and files matching the executable globs get their
//! execute bits set. Each pass reports the files it modified so the
//! caller can re-stage exactly those. A failure on one file is logged
//! and skipped, never fatal to the batch.

use crate::config::NormalizeConfig;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Files modified by a normalization run.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Files whose line endings were rewritten.
    pub line_endings_fixed: Vec<PathBuf>,
    /// Files whose permissions were corrected.
    pub permissions_fixed: Vec<PathBuf>,
}

impl NormalizeReport {
    /// All modified files, for re-staging.
    pub fn modified(&self) -> impl Iterator<Item = &PathBuf> {
        self.line_endings_fixed
            .iter()
            .chain(self.permissions_fixed.iter())
    }

    /// Whether anything changed.
    pub fn changed(&self) -> bool {
        !self.line_endings_fixed.is_empty() || !self.permissions_fixed.is_empty()
    }
}

/// Normalizer for line endings and executable permissions.
pub struct RepoNormalizer {
    executable_globs: Vec<glob::Pattern>,
}

impl RepoNormalizer {
    /// Create a normalizer from configuration.
    pub fn with_config(config: &NormalizeConfig) -> Self {
        let executable_globs = config
            .executable_globs
            .iter()
            .filter_map(|g| match glob::Pattern::new(g) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("Ignoring executable glob '{}': {}", g, e);
                    None
                }
            })
            .collect();
        Self { executable_globs }
    }

    /// Run both passes over repository-relative `files` rooted at `workdir`.
    pub fn normalize(&self, workdir: &Path, files: &[PathBuf]) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        for file in files {
            let full = workdir.join(file);

            match fix_line_endings(&full) {
                Ok(true) => report.line_endings_fixed.push(file.clone()),
                Ok(false) => {}
                Err(e) => tracing::warn!("Skipping {} (line endings): {}", file.display(), e),
            }

            if self.is_executable_target(file) {
                match ensure_executable(&full) {
                    Ok(true) => report.permissions_fixed.push(file.clone()),
                    Ok(false) => {}
                    Err(e) => tracing::warn!("Skipping {} (permissions): {}", file.display(), e),
                }
            }
        }

        report
    }

    fn is_executable_target(&self, path: &Path) -> bool {
        self.executable_globs.iter().any(|p| {
            p.matches_path(path)
                || path
                    .file_name()
                    .map(|n| p.matches(&n.to_string_lossy()))
                    .unwrap_or(false)
        })
    }
}

/// Replace every CRLF with LF. Returns whether the file changed.
fn fix_line_endings(path: &Path) -> std::io::Result<bool> {
    let content = std::fs::read(path)?;
    if !content.windows(2).any(|w| w == b"\r\n") {
        return Ok(false);
    }

    let mut fixed = Vec::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        if content[i] == b'\r' && i + 1 < content.len() && content[i + 1] == b'\n' {
            fixed.push(b'\n');
            i += 2;
        } else {
            fixed.push(content[i]);
            i += 1;
        }
    }

    std::fs::write(path, fixed)?;
    Ok(true)
}

/// Ensure owner/group/other execute bits. Returns whether the mode changed.
fn ensure_executable(path: &Path) -> std::io::Result<bool> {
    let metadata = std::fs::metadata(path)?;
    let mut perms = metadata.permissions();
    let mode = perms.mode();

    if mode & 0o111 == 0o111 {
        return Ok(false);
    }

    perms.set_mode(mode | 0o111);
    std::fs::set_permissions(path, perms)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn normalizer() -> RepoNormalizer {
        RepoNormalizer::with_config(&NormalizeConfig::default())
    }

    #[test]
    fn test_crlf_rewritten_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "a\r\nb\r\n").unwrap();
        let files = vec![PathBuf::from("notes.txt")];

        let report = normalizer().normalize(dir.path(), &files);
        assert_eq!(report.line_endings_fixed, files);
        assert_eq!(
            fs::read(dir.path().join("notes.txt")).unwrap(),
            b"a\nb\n".to_vec()
        );

        // second run changes and stages nothing
        let report = normalizer().normalize(dir.path(), &files);
        assert!(!report.changed());
    }

    #[test]
    fn test_lone_cr_preserved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("odd.txt"), "a\rb\n").unwrap();
        let files = vec![PathBuf::from("odd.txt")];

        let report = normalizer().normalize(dir.path(), &files);
        assert!(!report.changed());
    }

    #[test]
    fn test_exec_bits_set_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).unwrap();

        let files = vec![PathBuf::from("run.sh")];
        let report = normalizer().normalize(dir.path(), &files);
        assert_eq!(report.permissions_fixed, files);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        let report = normalizer().normalize(dir.path(), &files);
        assert!(!report.changed());
    }

    #[test]
    fn test_non_executable_target_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.txt"), "x\n").unwrap();

        let report = normalizer().normalize(dir.path(), &[PathBuf::from("data.txt")]);
        assert!(report.permissions_fixed.is_empty());
    }

    #[test]
    fn test_missing_file_skipped() {
        let dir = TempDir::new().unwrap();
        let report = normalizer().normalize(dir.path(), &[PathBuf::from("gone.sh")]);
        assert!(!report.changed());
    }

    #[test]
    fn test_modified_iterates_both_passes() {
        let report = NormalizeReport {
            line_endings_fixed: vec![PathBuf::from("a")],
            permissions_fixed: vec![PathBuf::from("b")],
        };
        let all: Vec<_> = report.modified().collect();
        assert_eq!(all.len(), 2);
    }
}
