//! Source client error types.

use std::time::Duration;

use reproai_core::{ReproError, enums::DataSource};
use thiserror::Error;

/// Errors that can occur when talking to an external service.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("{service} HTTP error: {error}")]
    Http {
        service: DataSource,
        #[source]
        error: reqwest::Error,
    },

    /// The service returned a non-success status code.
    #[error("{service} API error ({status}): {message}")]
    Api {
        service: DataSource,
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or (truncated) response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("{service} rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        service: DataSource,
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body could not be decoded.
    #[error("{service} parse error: {detail}")]
    Parse { service: DataSource, detail: String },

    /// The service has no usable configuration (e.g. missing API key).
    #[error("{service} is not configured")]
    NotConfigured { service: DataSource },

    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SourceError {
    pub(crate) fn http(service: DataSource) -> impl FnOnce(reqwest::Error) -> Self {
        move |error| Self::Http { service, error }
    }

    pub(crate) fn parse(service: DataSource, detail: impl Into<String>) -> Self {
        Self::Parse {
            service,
            detail: detail.into(),
        }
    }

    /// Service the error originated from, if any.
    #[must_use]
    pub const fn service(&self) -> Option<DataSource> {
        match self {
            Self::Http { service, .. }
            | Self::Api { service, .. }
            | Self::RateLimited { service, .. }
            | Self::Parse { service, .. }
            | Self::NotConfigured { service } => Some(*service),
            Self::Client(_) => None,
        }
    }

    /// Transport failures, 5xx and 429 are worth another attempt; everything
    /// else fails the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http { .. } | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Parse { .. } | Self::NotConfigured { .. } | Self::Client(_) => false,
        }
    }

    /// Server-requested wait before the next attempt.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(Duration::from_secs(*retry_after_secs)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<SourceError> for ReproError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::Parse { service, .. } => Self::MalformedResponse { service },
            SourceError::Client(error) => Self::SourceUnavailable {
                service: DataSource::Github,
                cause: error.to_string(),
            },
            other => {
                let service = other.service().unwrap_or(DataSource::Github);
                Self::SourceUnavailable {
                    service,
                    cause: other.to_string(),
                }
            }
        }
    }
}
