use thiserror::Error;

/// Why `ReproConfig` could not be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML layer or environment value failed to deserialize.
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A `.env` file exists but could not be read or parsed.
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// A value deserialized but cannot drive a run.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
