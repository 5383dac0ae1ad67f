// SPDX-License-Identifier: MIT

//! Commit message grammar gate.
//!
//! Validates the first line of a commit message against the conventional
//! grammar `type(scope)?: description`. Merge commits bypass validation
//! unconditionally. The gate always rejects a mismatch; the suggestion it
//! attaches is advisory only.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::GateConfig;
use crate::error::Result;
use crate::git::{self, Repository};
use crate::suggest::SuggestionClient;

lazy_static! {
    /// First-line grammar for conventional commits.
    static ref CONVENTIONAL_REGEX: Regex = Regex::new(
        r"^(?P<type>feat|fix|docs|style|refactor|perf|test|build|ci|chore|revert)(?:\((?P<scope>[a-z0-9-]+)\))?: .+$"
    )
    .unwrap();
}

/// The eleven conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConventionalType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl ConventionalType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConventionalType::Feat => "feat",
            ConventionalType::Fix => "fix",
            ConventionalType::Docs => "docs",
            ConventionalType::Style => "style",
            ConventionalType::Refactor => "refactor",
            ConventionalType::Perf => "perf",
            ConventionalType::Test => "test",
            ConventionalType::Build => "build",
            ConventionalType::Ci => "ci",
            ConventionalType::Chore => "chore",
            ConventionalType::Revert => "revert",
        }
    }

    /// Get all commit types.
    pub fn all() -> &'static [ConventionalType] {
        &[
            ConventionalType::Feat,
            ConventionalType::Fix,
            ConventionalType::Docs,
            ConventionalType::Style,
            ConventionalType::Refactor,
            ConventionalType::Perf,
            ConventionalType::Test,
            ConventionalType::Build,
            ConventionalType::Ci,
            ConventionalType::Chore,
            ConventionalType::Revert,
        ]
    }

    /// Whether this type triggers a version bump.
    pub fn triggers_bump(&self) -> bool {
        matches!(
            self,
            ConventionalType::Feat | ConventionalType::Fix | ConventionalType::Perf
        )
    }

    /// Classify a commit first line by its `type:` or `type(` prefix.
    pub fn classify(first_line: &str) -> Option<ConventionalType> {
        Self::all().iter().copied().find(|t| {
            first_line.starts_with(&format!("{}:", t.as_str()))
                || first_line.starts_with(&format!("{}(", t.as_str()))
        })
    }
}

impl std::str::FromStr for ConventionalType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for ConventionalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed commit message first line.
#[derive(Debug, Clone)]
pub struct CommitMessage {
    /// The raw first line.
    pub raw_first_line: String,
    /// Parsed type, if the grammar matched.
    pub parsed_type: Option<ConventionalType>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Description after the colon.
    pub description: Option<String>,
}

impl CommitMessage {
    /// Parse the first line of a raw message.
    pub fn parse(raw: &str) -> Self {
        let first_line = raw.lines().next().unwrap_or("").to_string();

        match CONVENTIONAL_REGEX.captures(&first_line) {
            Some(caps) => {
                let parsed_type = caps
                    .name("type")
                    .and_then(|m| m.as_str().parse::<ConventionalType>().ok());
                let scope = caps.name("scope").map(|m| m.as_str().to_string());
                let description = first_line.split_once(": ").map(|(_, d)| d.to_string());
                Self {
                    raw_first_line: first_line,
                    parsed_type,
                    scope,
                    description,
                }
            }
            None => Self {
                raw_first_line: first_line,
                parsed_type: None,
                scope: None,
                description: None,
            },
        }
    }

    /// Whether this is a merge commit message.
    pub fn is_merge(&self) -> bool {
        self.raw_first_line.starts_with("Merge")
    }

    /// Whether the first line satisfies the grammar.
    pub fn is_conventional(&self) -> bool {
        self.parsed_type.is_some()
    }
}

/// The outcome of validating one commit message.
#[derive(Debug, Clone)]
pub enum MessageVerdict {
    /// The message satisfies the grammar.
    Accepted(CommitMessage),
    /// Merge commits are accepted unconditionally.
    MergeBypass,
    /// The message fails the grammar; the suggestion is advisory.
    Rejected { suggestion: String },
}

/// Grammar gate with an advisory LLM suggestion on failure.
pub struct CommitMessageValidator {
    suggester: SuggestionClient,
}

impl CommitMessageValidator {
    /// Create a validator from configuration.
    pub fn with_config(config: &GateConfig) -> Self {
        Self {
            suggester: SuggestionClient::with_config(&config.suggest),
        }
    }

    /// Validate a raw commit message.
    ///
    /// On grammar mismatch the staged diff of `repo` is handed to the
    /// suggestion collaborator; any collaborator failure degrades to the
    /// configured fallback line.
    pub fn validate(&self, repo: &Repository, raw: &str) -> Result<MessageVerdict> {
        let message = CommitMessage::parse(raw);

        if message.is_merge() {
            return Ok(MessageVerdict::MergeBypass);
        }

        if message.is_conventional() {
            return Ok(MessageVerdict::Accepted(message));
        }

        let diff = git::staged_diff_text(repo).unwrap_or_default();
        let suggestion = self.suggester.suggest(&diff);
        Ok(MessageVerdict::Rejected { suggestion })
    }
}
