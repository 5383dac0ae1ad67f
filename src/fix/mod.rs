// SPDX-License-Identifier: MIT

//! Style auto-fixer.
//!
//! Five ordered, line-based repair passes over source files. The passes
//! are textual pattern heuristics, not a parser: a line that merely looks
//! like the matched construct (inside a string literal, say) will be
//! rewritten too. That behavior is part of the contract. Every pass is
//! idempotent, so re-running the fixer over its own output is a no-op.

mod imports;
mod indent;
mod resource;
mod scoped;
mod whitespace;

use crate::config::FixConfig;
use crate::error::{ConfigError, GateError, Result};
use std::path::Path;

/// The result of fixing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// Nothing to repair; file and index untouched.
    Clean,
    /// The file was rewritten and must be re-staged.
    Fixed,
}

/// Heuristic engine for repairing common textual defects.
pub struct StyleAutoFixer {
    target: glob::Pattern,
}

impl StyleAutoFixer {
    /// Create a fixer from configuration.
    pub fn with_config(config: &FixConfig) -> Result<Self> {
        let target = glob::Pattern::new(&config.target_glob).map_err(|e| {
            GateError::Config(ConfigError::InvalidValue {
                key: "fix.target_glob".to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Self { target })
    }

    /// Whether this fixer applies to a path.
    pub fn matches(&self, path: &Path) -> bool {
        self.target.matches_path(path)
            || path
                .file_name()
                .map(|n| self.target.matches(&n.to_string_lossy()))
                .unwrap_or(false)
    }

    /// Run all passes over a line sequence, in contract order.
    pub fn apply_passes(lines: &[String]) -> Vec<String> {
        let lines = indent::apply(lines);
        let lines = scoped::apply(&lines);
        let lines = resource::apply(&lines);
        let lines = imports::apply(&lines);
        whitespace::apply(&lines)
    }

    /// Fix one file in place.
    ///
    /// On change the file is rewritten with LF line endings and the
    /// caller must re-stage it. I/O errors bubble up so the batch driver
    /// can report and skip the file.
    pub fn fix_file(&self, path: &Path) -> Result<FixOutcome> {
        let content = std::fs::read_to_string(path)?;
        let lines: Vec<String> = content.lines().map(String::from).collect();

        let fixed = Self::apply_passes(&lines);
        let mut output = fixed.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }

        if output == content {
            return Ok(FixOutcome::Clean);
        }

        std::fs::write(path, output)?;
        Ok(FixOutcome::Fixed)
    }
}
