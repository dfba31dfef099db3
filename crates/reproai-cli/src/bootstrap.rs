use std::path::PathBuf;

use anyhow::Context;
use reproai_config::ReproConfig;

use crate::cli::RunArgs;

/// Load `.env` before anything reads the environment, logging included.
pub fn load_env() -> anyhow::Result<Option<PathBuf>> {
    reproai_config::load_dotenv().context("failed to load environment")
}

/// Layered configuration with CLI flags on top. `.env` is already loaded.
pub fn load_config(args: &RunArgs) -> anyhow::Result<ReproConfig> {
    let mut config = ReproConfig::load().context("failed to load configuration")?;
    apply_flags(&mut config, args);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// CLI flags have the highest priority.
fn apply_flags(config: &mut ReproConfig, args: &RunArgs) {
    if let Some(dir) = &args.output_dir {
        config.general.output_dir = dir.display().to_string();
    }
    if let Some(token) = args.github_token.as_deref().filter(|t| !t.trim().is_empty()) {
        config.github.token = token.to_string();
    }
    if let Some(policy) = args.missing_signals {
        config.scoring.missing_signals = policy.into();
    }
    if args.no_classifier {
        config.classifier.enabled = false;
    }
}
