// SPDX-License-Identifier: MIT

//! LLM suggestion collaborator.
//!
//! Requests a single conventional-commit line from an OpenAI-compatible
//! chat-completions endpoint, with the staged diff as context. The call
//! is blocking with an explicit timeout; every failure mode (missing
//! key, network, auth, malformed response) degrades to the configured
//! fallback line. This collaborator can never fail the pipeline.

use crate::config::SuggestConfig;
use serde::Deserialize;
use std::time::Duration;

/// Instruction constraining the collaborator to exactly one line.
const SYSTEM_PROMPT: &str = "You are a commit message assistant. Given a staged git diff, \
reply with exactly one line: a conventional commit message of the form \
type(scope): description, where type is one of feat, fix, docs, style, \
refactor, perf, test, build, ci, chore, revert. Output nothing else.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Client for the suggestion collaborator.
pub struct SuggestionClient {
    config: SuggestConfig,
}

impl SuggestionClient {
    /// Create a client from configuration.
    pub fn with_config(config: &SuggestConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Request a one-line suggestion for the given staged diff.
    ///
    /// Always returns a usable line; on any failure this is the
    /// configured fallback.
    pub fn suggest(&self, staged_diff: &str) -> String {
        if !self.config.enabled {
            return self.config.fallback.clone();
        }

        match self.request(staged_diff) {
            Ok(line) => line,
            Err(reason) => {
                tracing::warn!("Suggestion collaborator unavailable: {}", reason);
                self.config.fallback.clone()
            }
        }
    }

    fn request(&self, staged_diff: &str) -> std::result::Result<String, String> {
        let api_key = std::env::var(&self.config.api_key_env)
            .map_err(|_| format!("{} is not set", self.config.api_key_env))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| e.to_string())?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": staged_diff },
            ],
        });

        let response = client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let parsed: ChatResponse = response.json().map_err(|e| e.to_string())?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or_default();

        // constrain to one line even if the model disobeys
        let line = content.lines().next().unwrap_or_default().trim().to_string();
        if line.is_empty() {
            return Err("empty suggestion".to_string());
        }
        Ok(line)
    }
}
