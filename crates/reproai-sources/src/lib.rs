//! # reproai-sources
//!
//! HTTP clients for the services a reproai run depends on:
//! - academic graph (OpenAlex works)
//! - code hosting (GitHub REST API)
//! - model hosting (Hugging Face Hub)
//! - usage insights (citation counts)
//! - text classifier (OpenAI-compatible chat completions)
//!
//! Every fetch is a single request with the per-service timeout from
//! [`ReproConfig`]. Retries are the caller's concern.

pub mod classifier;
pub mod github;
pub mod huggingface;
pub mod insights;
pub mod openalex;

mod error;
mod http;

pub use error::SourceError;
pub use huggingface::{HubEntry, HubRepoType};

use std::time::Duration;

use reproai_config::{
    ClassifierConfig, GitHubConfig, HuggingFaceConfig, InsightsConfig, OpenAlexConfig, ReproConfig,
};

/// Client for every external source, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    openalex: OpenAlexConfig,
    github: GitHubConfig,
    huggingface: HuggingFaceConfig,
    insights: InsightsConfig,
    classifier: ClassifierConfig,
}

impl SourceClient {
    /// Build a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Client`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn from_config(config: &ReproConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.general.user_agent.as_str())
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            http,
            openalex: config.openalex.clone(),
            github: config.github.clone(),
            huggingface: config.huggingface.clone(),
            insights: config.insights.clone(),
            classifier: config.classifier.clone(),
        })
    }

    /// Whether the classifier has enough configuration to be called.
    #[must_use]
    pub fn classifier_configured(&self) -> bool {
        self.classifier.is_configured()
    }
}

fn secs(timeout_secs: u64) -> Duration {
    Duration::from_secs(timeout_secs)
}

fn base(url: &str) -> &str {
    url.trim_end_matches('/')
}
