// SPDX-License-Identifier: MIT

//! Hook installation, verification and self-healing.

use crate::error::{GateError, HookError, Result};
use crate::git::Repository;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::templates::{HookTemplate, HOOK_MARKER};

/// Deadline for one hook probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health report for one hook file.
#[derive(Debug, Clone)]
pub struct HookRecord {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub executable: bool,
    pub verified: bool,
    pub message: String,
}

impl HookRecord {
    fn missing(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
            exists: false,
            executable: false,
            verified: false,
            message: "not installed".to_string(),
        }
    }
}

/// Manages the hook scripts in a repository's hooks directory.
pub struct HookManager {
    hooks_dir: PathBuf,
}

impl HookManager {
    /// Create a manager for the given repository.
    pub fn new(repo: &Repository) -> Self {
        Self {
            hooks_dir: repo.hooks_dir(),
        }
    }

    /// Create a manager for an explicit hooks directory.
    pub fn at_dir(hooks_dir: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
        }
    }

    /// The hooks directory this manager operates on.
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn hook_path(&self, template: HookTemplate) -> PathBuf {
        self.hooks_dir.join(template.filename())
    }

    /// Whether an existing file is a script we generated.
    fn is_our_hook(path: &Path) -> bool {
        fs::read_to_string(path)
            .map(|content| content.contains(HOOK_MARKER))
            .unwrap_or(false)
    }

    /// Install one hook script.
    ///
    /// A pre-existing foreign hook is preserved as `<name>.backup`
    /// before being replaced. Our own hooks are overwritten in place
    /// only when `force` is set.
    pub fn install_hook(&self, template: HookTemplate, force: bool) -> Result<bool> {
        let path = self.hook_path(template);
        let name = template.filename();

        fs::create_dir_all(&self.hooks_dir).map_err(|e| {
            GateError::Hook(HookError::InstallFailed {
                hook: name.to_string(),
                message: e.to_string(),
            })
        })?;

        if path.exists() {
            if Self::is_our_hook(&path) {
                if !force {
                    tracing::debug!("Hook {} already installed", name);
                    return Ok(false);
                }
            } else {
                let backup = self.hooks_dir.join(format!("{}.backup", name));
                fs::rename(&path, &backup).map_err(|e| {
                    GateError::Hook(HookError::InstallFailed {
                        hook: name.to_string(),
                        message: format!("failed to back up existing hook: {}", e),
                    })
                })?;
                tracing::info!("Existing {} hook backed up to {}", name, backup.display());
            }
        }

        fs::write(&path, template.generate()).map_err(|e| {
            GateError::Hook(HookError::InstallFailed {
                hook: name.to_string(),
                message: e.to_string(),
            })
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)
                .map_err(|e| {
                    GateError::Hook(HookError::InstallFailed {
                        hook: name.to_string(),
                        message: e.to_string(),
                    })
                })?
                .permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).map_err(|e| {
                GateError::Hook(HookError::InstallFailed {
                    hook: name.to_string(),
                    message: e.to_string(),
                })
            })?;
        }

        tracing::info!("Installed {} hook", name);
        Ok(true)
    }

    /// Install every managed hook. Returns the names that were written.
    pub fn install_all(&self, force: bool) -> Result<Vec<&'static str>> {
        let mut written = Vec::new();
        for template in HookTemplate::all() {
            if self.install_hook(*template, force)? {
                written.push(template.filename());
            }
        }
        Ok(written)
    }

    /// Remove one of our hook scripts. Foreign hooks are left alone.
    pub fn uninstall_hook(&self, template: HookTemplate) -> Result<bool> {
        let path = self.hook_path(template);
        let name = template.filename();

        if !path.exists() {
            return Ok(false);
        }
        if !Self::is_our_hook(&path) {
            tracing::warn!("Hook {} was not installed by commitgate; leaving it", name);
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| {
            GateError::Hook(HookError::RemoveFailed {
                hook: name.to_string(),
                message: e.to_string(),
            })
        })?;

        // restore a backed-up foreign hook if one exists
        let backup = self.hooks_dir.join(format!("{}.backup", name));
        if backup.exists() {
            fs::rename(&backup, &path).map_err(|e| {
                GateError::Hook(HookError::RemoveFailed {
                    hook: name.to_string(),
                    message: format!("failed to restore backup: {}", e),
                })
            })?;
            tracing::info!("Restored previous {} hook from backup", name);
        }

        Ok(true)
    }

    /// Remove every managed hook. Returns the names that were removed.
    pub fn uninstall_all(&self) -> Result<Vec<&'static str>> {
        let mut removed = Vec::new();
        for template in HookTemplate::all() {
            if self.uninstall_hook(*template)? {
                removed.push(template.filename());
            }
        }
        Ok(removed)
    }

    /// Report presence and ownership of each managed hook without
    /// executing anything.
    pub fn status(&self) -> Vec<HookRecord> {
        HookTemplate::all()
            .iter()
            .map(|template| {
                let path = self.hook_path(*template);
                let name = template.filename();
                if !path.exists() {
                    return HookRecord::missing(name, path);
                }
                let executable = is_executable(&path);
                let ours = Self::is_our_hook(&path);
                HookRecord {
                    name: name.to_string(),
                    path,
                    exists: true,
                    executable,
                    verified: false,
                    message: if ours {
                        "installed".to_string()
                    } else {
                        "present but not managed by commitgate".to_string()
                    },
                }
            })
            .collect()
    }

    /// Probe one hook file by executing it with `--version`.
    ///
    /// The probe must exit zero within [`PROBE_TIMEOUT`]; a hang is
    /// killed and reported distinctly from a failing exit.
    pub fn verify_hook(&self, path: &Path) -> HookRecord {
        self.verify_hook_with_deadline(path, PROBE_TIMEOUT)
    }

    /// Probe one hook file with an explicit deadline.
    pub fn verify_hook_with_deadline(&self, path: &Path, timeout: Duration) -> HookRecord {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if !path.exists() {
            return HookRecord::missing(&name, path.to_path_buf());
        }

        if !is_executable(path) {
            return HookRecord {
                name,
                path: path.to_path_buf(),
                exists: true,
                executable: false,
                verified: false,
                message: "not executable".to_string(),
            };
        }

        let (verified, message) = match probe(path, timeout) {
            ProbeResult::Ok => (true, "healthy".to_string()),
            ProbeResult::Failed(status) => {
                (false, format!("probe exited with status {}", status))
            }
            ProbeResult::TimedOut => (false, format!("probe timed out after {:?}", timeout)),
            ProbeResult::LaunchError(message) => (false, message),
        };

        HookRecord {
            name,
            path: path.to_path_buf(),
            exists: true,
            executable: true,
            verified,
            message,
        }
    }

    /// Probe every hook file in the hooks directory.
    ///
    /// Samples and backups are skipped. Returns the records, or an
    /// aggregate error when any probe failed.
    pub fn verify_all(&self) -> Result<Vec<HookRecord>> {
        let mut records = Vec::new();

        let entries = fs::read_dir(&self.hooks_dir).map_err(GateError::Io)?;
        for entry in entries {
            let path = entry.map_err(GateError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.ends_with(".sample") || name.ends_with(".backup") {
                continue;
            }
            records.push(self.verify_hook(&path));
        }

        let failed = records.iter().filter(|r| !r.verified).count();
        if failed > 0 {
            let total = records.len();
            for record in records.iter().filter(|r| !r.verified) {
                tracing::warn!("Hook {} unhealthy: {}", record.name, record.message);
            }
            return Err(GateError::Hook(HookError::VerificationFailed {
                failed,
                total,
            }));
        }

        Ok(records)
    }

    /// Reinstall any required hook that is missing or not executable.
    ///
    /// A working hook is left alone even when it is not ours; replacing
    /// a foreign hook is reserved for an explicit install. Returns the
    /// names that were healed.
    pub fn ensure_installed(&self) -> Result<Vec<&'static str>> {
        let mut healed = Vec::new();
        for template in HookTemplate::required() {
            let path = self.hook_path(*template);
            if !path.exists() || !is_executable(&path) {
                self.install_hook(*template, true)?;
                healed.push(template.filename());
            }
        }
        Ok(healed)
    }

    /// Whether a merge that changed the given paths warrants a forced
    /// reinstall of all hooks.
    pub fn merge_touches_hooks(changed: &[PathBuf]) -> bool {
        changed.iter().any(|path| {
            path.starts_with("hooks")
                || path
                    .file_name()
                    .map(|n| n == "commitgate.toml" || n == ".commitgate.toml")
                    .unwrap_or(false)
        })
    }
}

enum ProbeResult {
    Ok,
    Failed(i32),
    TimedOut,
    LaunchError(String),
}

/// Run a hook with `--version`, enforcing the probe deadline.
fn probe(path: &Path, timeout: Duration) -> ProbeResult {
    let child = Command::new(path)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => return ProbeResult::LaunchError(format!("failed to launch: {}", e)),
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return if status.success() {
                    ProbeResult::Ok
                } else {
                    ProbeResult::Failed(status.code().unwrap_or(-1))
                };
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return ProbeResult::TimedOut;
                }
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => return ProbeResult::LaunchError(format!("failed to wait: {}", e)),
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, HookManager) {
        let dir = TempDir::new().unwrap();
        let hooks_dir = dir.path().join("hooks");
        let manager = HookManager::at_dir(&hooks_dir);
        (dir, manager)
    }

    #[test]
    fn test_install_writes_executable_script() {
        let (_dir, manager) = manager();
        assert!(manager.install_hook(HookTemplate::PreCommit, false).unwrap());

        let path = manager.hooks_dir().join("pre-commit");
        assert!(path.exists());
        assert!(is_executable(&path));
        assert!(fs::read_to_string(&path).unwrap().contains(HOOK_MARKER));
    }

    #[test]
    fn test_reinstall_without_force_is_noop() {
        let (_dir, manager) = manager();
        assert!(manager.install_hook(HookTemplate::PreCommit, false).unwrap());
        assert!(!manager.install_hook(HookTemplate::PreCommit, false).unwrap());
        assert!(manager.install_hook(HookTemplate::PreCommit, true).unwrap());
    }

    #[test]
    fn test_foreign_hook_is_backed_up_and_restored() {
        let (_dir, manager) = manager();
        let path = manager.hooks_dir().join("pre-commit");
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();

        manager.install_hook(HookTemplate::PreCommit, false).unwrap();
        let backup = manager.hooks_dir().join("pre-commit.backup");
        assert!(backup.exists());
        assert!(fs::read_to_string(&backup).unwrap().contains("custom"));

        assert!(manager.uninstall_hook(HookTemplate::PreCommit).unwrap());
        assert!(!backup.exists());
        assert!(fs::read_to_string(&path).unwrap().contains("custom"));
    }

    #[test]
    fn test_uninstall_leaves_foreign_hook() {
        let (_dir, manager) = manager();
        let path = manager.hooks_dir().join("commit-msg");
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();

        assert!(!manager.uninstall_hook(HookTemplate::CommitMsg).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_status_reports_missing_and_foreign() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        manager.install_hook(HookTemplate::PreCommit, false).unwrap();
        fs::write(manager.hooks_dir().join("commit-msg"), "#!/bin/sh\n").unwrap();

        let records = manager.status();
        let by_name = |name: &str| records.iter().find(|r| r.name == name).unwrap();

        assert!(by_name("pre-commit").exists);
        assert_eq!(by_name("pre-commit").message, "installed");
        assert!(by_name("commit-msg").message.contains("not managed"));
        assert!(!by_name("post-commit").exists);
    }

    #[test]
    fn test_verify_passing_probe() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        let path = manager.hooks_dir().join("pre-commit");
        fs::write(
            &path,
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then exit 0; fi\nexit 1\n",
        )
        .unwrap();
        set_exec(&path);

        let record = manager.verify_hook(&path);
        assert!(record.verified, "{}", record.message);
    }

    #[test]
    fn test_verify_failing_probe() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        let path = manager.hooks_dir().join("pre-commit");
        fs::write(&path, "#!/bin/sh\nexit 7\n").unwrap();
        set_exec(&path);

        let record = manager.verify_hook(&path);
        assert!(!record.verified);
        assert!(record.message.contains("status 7"));
    }

    #[test]
    fn test_verify_hanging_probe_times_out() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        let path = manager.hooks_dir().join("pre-commit");
        fs::write(&path, "#!/bin/sh\nsleep 30\n").unwrap();
        set_exec(&path);

        let record = manager.verify_hook_with_deadline(&path, Duration::from_millis(200));
        assert!(!record.verified);
        assert!(record.message.contains("timed out"), "{}", record.message);
    }

    #[test]
    fn test_verify_not_executable() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        let path = manager.hooks_dir().join("pre-commit");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();

        let record = manager.verify_hook(&path);
        assert!(!record.verified);
        assert_eq!(record.message, "not executable");
    }

    #[test]
    fn test_verify_all_skips_samples_and_backups() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        manager.install_all(false).unwrap();
        fs::write(manager.hooks_dir().join("pre-push.sample"), "sample").unwrap();
        fs::write(manager.hooks_dir().join("pre-commit.backup"), "old").unwrap();

        // generated scripts exec commitgate only past the probe branch,
        // so verification succeeds without the binary on PATH
        let records = manager.verify_all().unwrap();
        assert_eq!(records.len(), HookTemplate::all().len());
        assert!(records.iter().all(|r| r.verified));
    }

    #[test]
    fn test_ensure_installed_heals_missing_required() {
        let (_dir, manager) = manager();
        manager.install_all(false).unwrap();
        fs::remove_file(manager.hooks_dir().join("commit-msg")).unwrap();

        let healed = manager.ensure_installed().unwrap();
        assert_eq!(healed, vec!["commit-msg"]);
        assert!(manager.hooks_dir().join("commit-msg").exists());
    }

    #[test]
    fn test_ensure_installed_leaves_working_foreign_hook() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        manager.install_all(false).unwrap();

        let path = manager.hooks_dir().join("pre-commit");
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();
        set_exec(&path);

        let healed = manager.ensure_installed().unwrap();
        assert!(healed.is_empty());
        assert!(fs::read_to_string(&path).unwrap().contains("custom"));
    }

    #[test]
    fn test_ensure_installed_heals_non_executable_hook() {
        let (_dir, manager) = manager();
        fs::create_dir_all(manager.hooks_dir()).unwrap();
        let path = manager.hooks_dir().join("commit-msg");
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();

        let healed = manager.ensure_installed().unwrap();
        assert!(healed.contains(&"commit-msg"));
        assert!(fs::read_to_string(&path).unwrap().contains(HOOK_MARKER));
        // the broken hook survives as a backup
        assert!(manager.hooks_dir().join("commit-msg.backup").exists());
    }

    #[test]
    fn test_merge_touches_hooks() {
        assert!(HookManager::merge_touches_hooks(&[PathBuf::from(
            "hooks/pre-commit"
        )]));
        assert!(HookManager::merge_touches_hooks(&[PathBuf::from(
            "commitgate.toml"
        )]));
        assert!(!HookManager::merge_touches_hooks(&[PathBuf::from(
            "src/main.py"
        )]));
    }

    fn set_exec(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(path, perms).unwrap();
        }
    }
}
