use figment::Jail;
use reproai_config::ReproConfig;
use reproai_core::enums::MissingSignalPolicy;

#[test]
fn prefixed_env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("REPROAI_GITHUB__TOKEN", "ghp_prefixed");
        jail.set_env("REPROAI_SCORING__MISSING_SIGNALS", "zero");
        jail.set_env("REPROAI_RETRY__MAX_ATTEMPTS", "4");

        let config = ReproConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.github.token, "ghp_prefixed");
        assert_eq!(config.scoring.missing_signals, MissingSignalPolicy::Zero);
        assert_eq!(config.retry.max_attempts, 4);
        Ok(())
    });
}

#[test]
fn well_known_credentials_are_picked_up() {
    Jail::expect_with(|jail| {
        jail.set_env("GITHUB_TOKEN", "ghp_well_known");
        jail.set_env("HF_TOKEN", "hf_well_known");
        jail.set_env("OPENALEX_MAILTO", "me@example.org");
        jail.set_env("CLASSIFIER_API_KEY", "sk-well-known");

        let config = ReproConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.github.token, "ghp_well_known");
        assert_eq!(config.huggingface.token, "hf_well_known");
        assert_eq!(config.openalex.mailto, "me@example.org");
        assert_eq!(config.classifier.api_key, "sk-well-known");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_well_known_credentials() {
    Jail::expect_with(|jail| {
        jail.set_env("GITHUB_TOKEN", "ghp_well_known");
        jail.set_env("REPROAI_GITHUB__TOKEN", "ghp_prefixed");

        let config = ReproConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.github.token, "ghp_prefixed");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(".reproai").map_err(|e| e.to_string())?;
        jail.create_file(
            ".reproai/config.toml",
            r#"
[general]
output_dir = "from-toml"

[github]
token = "ghp_toml"
"#,
        )?;
        jail.set_env("REPROAI_GITHUB__TOKEN", "ghp_env");

        let config = ReproConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.output_dir, "from-toml");
        assert_eq!(config.github.token, "ghp_env");
        Ok(())
    });
}

#[test]
fn dotenv_file_is_loaded_into_the_environment() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "REPROAI_DOTENV_MARKER=loaded\n")?;

        let path = reproai_config::load_dotenv().map_err(|e| e.to_string())?;
        assert!(path.is_some_and(|p| p.ends_with(".env")));
        assert_eq!(std::env::var("REPROAI_DOTENV_MARKER").as_deref(), Ok("loaded"));

        // Unknown keys from .env do not break extraction.
        ReproConfig::load_with_dotenv().map_err(|e| e.to_string())?;
        Ok(())
    });
}

#[test]
fn malformed_dotenv_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "not a valid line\n")?;

        let err = reproai_config::load_dotenv().unwrap_err();
        assert!(matches!(err, reproai_config::ConfigError::Dotenv(_)));
        Ok(())
    });
}
