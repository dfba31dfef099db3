use std::path::PathBuf;

use reproai_core::ReproError;

/// Errors from assembling, rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Incomplete report: missing {0}")]
    Incomplete(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// The core taxonomy error for a missing identifier, if that is what this is.
    #[must_use]
    pub fn as_repro_error(&self) -> Option<ReproError> {
        match self {
            Self::Incomplete(field) => Some(ReproError::IncompleteReport(field.clone())),
            _ => None,
        }
    }
}
