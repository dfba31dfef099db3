//! OpenAlex (academic graph) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openalex.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAlexConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contact address sent as `mailto` to join the polite pool.
    #[serde(default)]
    pub mailto: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAlexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mailto: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OpenAlexConfig {
    /// Whether requests identify themselves for the polite pool.
    pub fn is_polite(&self) -> bool {
        !self.mailto.is_empty()
    }
}
