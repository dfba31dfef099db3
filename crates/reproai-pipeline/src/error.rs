use reproai_core::ReproError;
use reproai_report::ReportError;
use reproai_sources::SourceError;

/// Fatal run errors. Everything else degrades a report section.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] ReproError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("failed to initialise source clients: {0}")]
    Client(#[from] SourceError),
}

impl PipelineError {
    /// The core taxonomy error behind this failure, when there is one.
    #[must_use]
    pub fn repro_error(&self) -> Option<ReproError> {
        match self {
            Self::Input(e) => Some(e.clone()),
            Self::Report(e) => e.as_repro_error(),
            Self::Client(_) => None,
        }
    }
}
