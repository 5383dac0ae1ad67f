// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::GateConfig;

/// Get the default configuration.
pub fn default_config() -> GateConfig {
    GateConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# commitgate configuration file
# SPDX-License-Identifier: MIT

# Secret scanning
[scan]
enabled = true
allowlist = ["tests/fixtures/*", "*.sample"]

[[scan.patterns]]
name = "Internal Service Token"
pattern = "SVC_[A-Z0-9]{24}"

# Style auto-fixer
[fix]
enabled = true
target_glob = "*.py"

# Repository normalization
[normalize]
enabled = true
executable_globs = ["*.sh", "hooks/*", "scripts/*.sh"]

# External gates
[gates.lint]
enabled = true
command = "ruff"
args = ["check", "."]

[gates.analysis]
enabled = true
command = "mypy"
args = ["."]

# Commit message suggestions
[suggest]
enabled = true
endpoint = "https://api.openai.com/v1/chat/completions"
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"
timeout_secs = 60
fallback = "chore: update project files"

# Post-commit collaborators
[collaborators]
version_script = "scripts/bump_version.sh"
changelog_script = "scripts/generate_changelog.sh"

# Desktop notifications
[notify]
enabled = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert!(config.scan.enabled);
        assert!(config.normalize.enabled);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: GateConfig = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.scan.patterns.len(), 1);
        assert_eq!(config.gates.lint.command, "ruff");
    }
}
