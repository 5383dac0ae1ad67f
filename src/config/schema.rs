// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from
//! commitgate.toml.

use serde::{Deserialize, Serialize};

/// The main configuration structure for commitgate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Secret scanning configuration.
    pub scan: ScanConfig,

    /// Style auto-fixer configuration.
    pub fix: FixConfig,

    /// Repository normalization configuration.
    pub normalize: NormalizeConfig,

    /// External gate configuration (lint, static analysis).
    pub gates: GatesConfig,

    /// LLM suggestion configuration.
    pub suggest: SuggestConfig,

    /// Post-commit collaborator scripts.
    pub collaborators: CollaboratorsConfig,

    /// Notification configuration.
    pub notify: NotifyConfig,
}

impl GateConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Secret scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Whether secret scanning is enabled.
    pub enabled: bool,

    /// Custom secret patterns, appended to the built-in library.
    pub patterns: Vec<SecretPattern>,

    /// Filename globs exempt from scanning, appended to the built-in
    /// allow-list.
    pub allowlist: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            patterns: Vec::new(),
            allowlist: Vec::new(),
        }
    }
}

/// Secret pattern definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretPattern {
    /// Name of the pattern.
    pub name: String,

    /// Regex pattern to match.
    pub pattern: String,
}

/// Style auto-fixer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Whether the auto-fixer runs in the pre-commit hook.
    pub enabled: bool,

    /// Glob selecting the source files the fixer may rewrite.
    pub target_glob: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_glob: "*.py".to_string(),
        }
    }
}

/// Repository normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Whether normalization runs in the pre-commit hook.
    pub enabled: bool,

    /// Globs selecting files that must carry execute permission bits.
    pub executable_globs: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            executable_globs: vec!["*.sh".to_string(), "hooks/*".to_string()],
        }
    }
}

/// External gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatesConfig {
    /// Lint delegate.
    pub lint: DelegateConfig,

    /// Static analysis delegate.
    pub analysis: DelegateConfig,
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            lint: DelegateConfig {
                enabled: true,
                command: "ruff".to_string(),
                args: vec!["check".to_string(), ".".to_string()],
            },
            analysis: DelegateConfig {
                enabled: true,
                command: "mypy".to_string(),
                args: vec![".".to_string()],
            },
        }
    }
}

/// One external pass/fail delegate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DelegateConfig {
    /// Whether this delegate runs at all.
    pub enabled: bool,

    /// Command to execute.
    pub command: String,

    /// Arguments to pass.
    pub args: Vec<String>,
}

/// LLM suggestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Whether to request a suggestion on commit-message failure.
    pub enabled: bool,

    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Model identifier.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Message offered when the collaborator is unreachable.
    pub fallback: String,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
            fallback: "chore: update project files".to_string(),
        }
    }
}

/// Post-commit collaborator scripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorsConfig {
    /// Version-bump script, invoked with the single argument "bump".
    pub version_script: String,

    /// Changelog regeneration script, invoked with no arguments.
    pub changelog_script: String,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            version_script: "scripts/bump_version.sh".to_string(),
            changelog_script: "scripts/generate_changelog.sh".to_string(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Whether desktop notifications are attempted at all.
    pub enabled: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();
        assert!(config.scan.enabled);
        assert_eq!(config.fix.target_glob, "*.py");
        assert_eq!(config.suggest.timeout_secs, 60);
        assert!(config.collaborators.version_script.contains("bump"));
    }

    #[test]
    fn test_config_serialization() {
        let config = GateConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("target_glob"));
        assert!(toml_str.contains("timeout_secs"));
    }
}
