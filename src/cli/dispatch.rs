// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::config::GateConfig;
use crate::error::Result;
use crate::git;
use crate::hooks::HookManager;
use crate::pipeline;

use super::args::{Cli, Commands, HooksAction};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GateConfig::load_from(config_path)?
    } else {
        GateConfig::load()?
    };

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::PreCommit => {
            let repo = git::open_repo()?;
            pipeline::run_pre_commit(&config, &repo)
        }
        Commands::CommitMsg { ref file } => {
            let repo = git::open_repo()?;
            pipeline::run_commit_msg(&config, &repo, file)
        }
        Commands::PostCommit => {
            let repo = git::open_repo()?;
            pipeline::run_post_commit(&config, &repo)
        }
        Commands::PostMerge { ref old_head } => {
            let repo = git::open_repo()?;
            pipeline::run_post_merge(&config, &repo, old_head.as_deref())
        }
        Commands::Hooks(args) => run_hooks(args),
        Commands::Init { force } => run_init(force),
        Commands::Version => run_version(),
    }
}

/// Run the hooks command.
fn run_hooks(args: super::args::HooksArgs) -> Result<()> {
    use crate::error::{GateError, HookError};
    use crate::hooks::HookTemplate;

    let repo = git::open_repo()?;
    let manager = HookManager::new(&repo);

    let parse_hook = |name: &str| -> Result<HookTemplate> {
        name.parse().map_err(|_| {
            GateError::Hook(HookError::NotFound {
                hook: name.to_string(),
            })
        })
    };

    match args.action {
        HooksAction::Install { hook, force } => {
            if let Some(name) = hook {
                let template = parse_hook(&name)?;
                manager.install_hook(template, force)?;
                println!("✓ Installed {} hook", name);
            } else {
                manager.install_all(force)?;
                println!("✓ Installed all hooks");
            }
            // a freshly installed hook must answer its probe
            manager.verify_all()?;
        }
        HooksAction::Uninstall { hook } => {
            if let Some(name) = hook {
                manager.uninstall_hook(parse_hook(&name)?)?;
                println!("✓ Uninstalled {} hook", name);
            } else {
                manager.uninstall_all()?;
                println!("✓ Uninstalled all hooks");
            }
        }
        HooksAction::Status => {
            for record in manager.status() {
                let icon = if record.exists { "✓" } else { "✗" };
                println!("{} {} ({})", icon, record.name, record.message);
            }
        }
        HooksAction::Verify => {
            let records = manager.verify_all()?;
            for record in records {
                println!("✓ {} ({})", record.name, record.message);
            }
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(force: bool) -> Result<()> {
    use crate::config::example_config;
    use crate::error::{ConfigError, GateError};

    let config_path = std::path::Path::new("commitgate.toml");

    if config_path.exists() && !force {
        return Err(GateError::Config(ConfigError::InvalidValue {
            key: "commitgate.toml".to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        }));
    }

    std::fs::write(config_path, example_config()).map_err(|e| GateError::WithContext {
        context: "init".to_string(),
        message: format!("Failed to write configuration: {}", e),
    })?;

    println!("✓ Created commitgate.toml");
    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("commitgate {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}
