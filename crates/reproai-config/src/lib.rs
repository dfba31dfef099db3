//! # reproai-config
//!
//! Layered configuration loading for reproai using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REPROAI_*` prefix, `__` as separator)
//! 2. Well-known credential variables (`GITHUB_TOKEN`, `HF_TOKEN`,
//!    `OPENALEX_MAILTO`, `CLASSIFIER_API_KEY`)
//! 3. Project-level `.reproai/config.toml`
//! 4. User-level `~/.config/reproai/config.toml`
//! 5. Built-in defaults
//!
//! CLI flags are applied on top of the loaded struct by the binary.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REPROAI_GITHUB__TOKEN` -> `github.token`,
//! `REPROAI_SCORING__MISSING_SIGNALS` -> `scoring.missing_signals`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use reproai_config::ReproConfig;
//!
//! let config = ReproConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.classifier.is_configured() {
//!     println!("Classifier model: {}", config.classifier.model);
//! }
//! ```

mod classifier;
mod error;
mod general;
mod github;
mod huggingface;
mod insights;
mod openalex;
mod retry;
mod scoring;

pub use classifier::ClassifierConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use github::GitHubConfig;
pub use huggingface::HuggingFaceConfig;
pub use insights::InsightsConfig;
pub use openalex::OpenAlexConfig;
pub use retry::RetryConfig;
pub use scoring::{ScoringConfig, ScoringWeights};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Conventional credential variables and the config keys they fill.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("GITHUB_TOKEN", "github.token"),
    ("HF_TOKEN", "huggingface.token"),
    ("OPENALEX_MAILTO", "openalex.mailto"),
    ("CLASSIFIER_API_KEY", "classifier.api_key"),
];

/// Load a `.env` file into the process environment.
///
/// Variables already set are not overridden. Returns the path of the file
/// that was loaded, or `None` when there is no `.env`.
///
/// # Errors
///
/// Returns [`ConfigError::Dotenv`] when a `.env` file exists but cannot be
/// read or parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Process-wide configuration, built once at startup and passed by reference.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReproConfig {
    #[serde(default)]
    pub openalex: OpenAlexConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ReproConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory (if present), then the layers.
    ///
    /// The CLI loads `.env` earlier through [`load_dotenv`] so logging sees
    /// it too; calling this afterwards is harmless.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        load_dotenv()?;
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        Self::file_figment().merge(Self::env_providers())
    }

    /// Check values that deserialize fine but cannot drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("openalex.timeout_secs", self.openalex.timeout_secs),
            ("github.timeout_secs", self.github.timeout_secs),
            ("huggingface.timeout_secs", self.huggingface.timeout_secs),
            ("insights.timeout_secs", self.insights.timeout_secs),
            ("classifier.timeout_secs", self.classifier.timeout_secs),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.huggingface.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "huggingface.max_concurrency".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.general.output_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.output_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        self.scoring.weights.validate()
    }

    /// Defaults plus the TOML layers.
    fn file_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".reproai/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    /// Well-known credential variables, then `REPROAI_*` (highest priority).
    fn env_providers() -> Figment {
        let well_known = Env::raw().filter_map(|key| {
            WELL_KNOWN_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map(|(_, path)| (*path).into())
        });

        Figment::new()
            .merge(well_known)
            .merge(Env::prefixed("REPROAI_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reproai").join("config.toml"))
    }
}
