//! Cross-cutting error taxonomy for reproai.
//!
//! Domain-specific errors (`SourceError`, `ConfigError`, `ReportError`) live in
//! their own crates and map into [`ReproError`] where the pipeline needs to
//! decide between aborting and degrading a report section.

use thiserror::Error;

use crate::enums::DataSource;

/// Errors that decide how a reproai run proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReproError {
    /// An input identifier matched neither a recognized URL nor a bare pattern.
    /// Fatal; raised before any network call.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        field: String,
        value: String,
        reason: String,
    },

    /// An external dependency was unreachable or answered with a non-success
    /// status. Degrades the affected section.
    #[error("{service} unavailable: {cause}")]
    SourceUnavailable { service: DataSource, cause: String },

    /// An external dependency returned a body that could not be decoded.
    /// Degrades the affected section.
    #[error("{service} returned a malformed response")]
    MalformedResponse { service: DataSource },

    /// The text classifier could not produce a label. The report keeps the
    /// class and rationale absent.
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),

    /// A mandatory report field (one of the two input identifiers) is missing.
    #[error("Incomplete report: missing {0}")]
    IncompleteReport(String),
}

impl ReproError {
    /// Whether this error aborts the run instead of degrading one section.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. } | Self::IncompleteReport(_)
        )
    }

    pub(crate) fn invalid(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
