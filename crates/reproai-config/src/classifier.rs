//! External text-classifier configuration.
//!
//! The classifier is any OpenAI-compatible chat-completions endpoint.

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

const fn default_max_input_chars() -> usize {
    24_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Set to `false` to skip classification entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL; `/chat/completions` is appended unless already present.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token.
    #[serde(default)]
    pub api_key: String,

    /// Model name passed in the request body.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Paper text + repository summary is truncated to this many characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_input_chars: default_max_input_chars(),
        }
    }
}

impl ClassifierConfig {
    /// Check if the classifier has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.base_url.is_empty() && !self.model.is_empty() && !self.api_key.is_empty()
    }
}
