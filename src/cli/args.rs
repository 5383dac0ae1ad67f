// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// commitgate - commit quality gates and auto-remediation for git hooks
#[derive(Parser, Debug)]
#[command(name = "commitgate")]
#[command(version)]
#[command(about = "Commit quality gates and auto-remediation for git hooks", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the pre-commit pipeline (scan, fix, normalize, lint, analyze)
    PreCommit,

    /// Validate a commit message file
    CommitMsg {
        /// Path to the message file git hands the hook
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Run post-commit bookkeeping (version bump, changelog)
    PostCommit,

    /// Self-heal and verify hooks after a merge
    PostMerge {
        /// Pre-merge revision (defaults to ORIG_HEAD)
        #[arg(value_name = "OLD_HEAD")]
        old_head: Option<String>,
    },

    /// Manage git hooks
    Hooks(HooksArgs),

    /// Write an example commitgate.toml
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Print version information
    Version,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install the hook scripts
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Overwrite hooks we already installed
        #[arg(short, long)]
        force: bool,
    },

    /// Remove our hook scripts, restoring any backups
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show which hooks are installed
    Status,

    /// Probe every installed hook for health
    Verify,
}
