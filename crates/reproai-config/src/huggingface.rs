//! Hugging Face Hub (model hosting) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://huggingface.co".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_max_concurrency() -> usize {
    4
}

const fn default_max_artifacts() -> usize {
    25
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HuggingFaceConfig {
    /// Hub base URL (API paths are appended under `/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token for gated or private repositories.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of artifact lookups in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Maximum number of artifacts resolved per run; the rest keep no counts.
    #[serde(default = "default_max_artifacts")]
    pub max_artifacts: usize,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            max_artifacts: default_max_artifacts(),
        }
    }
}

impl HuggingFaceConfig {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}
