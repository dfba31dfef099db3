//! GitHub (code hosting) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access token; raises the rate limit when set.
    #[serde(default)]
    pub token: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_token() {
        let config = GitHubConfig::default();
        assert!(!config.has_token());
        assert_eq!(config.base_url, "https://api.github.com");
    }

    #[test]
    fn token_detected() {
        let config = GitHubConfig {
            token: "ghp_123".into(),
            ..Default::default()
        };
        assert!(config.has_token());
    }
}
