// SPDX-License-Identifier: MIT

//! Hook script templates.
//!
//! Each hook is a small shell shim that delegates to the commitgate
//! binary. The scripts answer a `--version` probe themselves so that
//! verification does not run the pipeline.

/// Marker identifying scripts written by us.
pub const HOOK_MARKER: &str = "Generated by commitgate";

/// The hook scripts commitgate manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    PreCommit,
    CommitMsg,
    PostCommit,
    PostMerge,
}

impl HookTemplate {
    /// All managed hooks.
    pub fn all() -> &'static [HookTemplate] {
        &[
            HookTemplate::PreCommit,
            HookTemplate::CommitMsg,
            HookTemplate::PostCommit,
            HookTemplate::PostMerge,
        ]
    }

    /// Hooks that must always be present for the pipeline to function.
    pub fn required() -> &'static [HookTemplate] {
        &[
            HookTemplate::CommitMsg,
            HookTemplate::PreCommit,
            HookTemplate::PostMerge,
        ]
    }

    /// The hook's filename under .git/hooks.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::PreCommit => "pre-commit",
            HookTemplate::CommitMsg => "commit-msg",
            HookTemplate::PostCommit => "post-commit",
            HookTemplate::PostMerge => "post-merge",
        }
    }

    /// The commitgate invocation the script delegates to.
    fn delegate_command(&self) -> &'static str {
        match self {
            HookTemplate::PreCommit => "commitgate pre-commit",
            HookTemplate::CommitMsg => "commitgate commit-msg \"$1\"",
            HookTemplate::PostCommit => "commitgate post-commit",
            HookTemplate::PostMerge => "commitgate post-merge",
        }
    }

    /// Generate the hook script body.
    pub fn generate(&self) -> String {
        format!(
            "#!/bin/sh\n\
             # commitgate {name} hook\n\
             # {marker}\n\
             if [ \"$1\" = \"--version\" ]; then\n\
             \techo \"commitgate hook: {name}\"\n\
             \texit 0\n\
             fi\n\
             exec {command}\n",
            name = self.filename(),
            marker = HOOK_MARKER,
            command = self.delegate_command(),
        )
    }
}

impl std::str::FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre-commit" => Ok(HookTemplate::PreCommit),
            "commit-msg" => Ok(HookTemplate::CommitMsg),
            "post-commit" => Ok(HookTemplate::PostCommit),
            "post-merge" => Ok(HookTemplate::PostMerge),
            _ => Err(()),
        }
    }
}
