//! # reproai-pipeline
//!
//! One reproducibility run, end to end:
//!
//! 1. resolve both identifiers (fatal on failure, before any request);
//! 2. fetch paper, repository and usage concurrently;
//! 3. extract artifact mentions and resolve their Hub counters;
//! 4. classify the paper/repository pair;
//! 5. score the evidence, assemble and write the report.
//!
//! Every non-fatal failure is recorded in the report's `unavailable` list.

mod error;
mod fetch;
mod resolve;
pub mod retry;

pub use error::PipelineError;

use std::path::{Path, PathBuf};

use chrono::Utc;
use reproai_config::ReproConfig;
use reproai_core::entities::{ClassificationResult, Report, Unavailable};
use reproai_core::enums::{DataSource, ReportSection};
use reproai_core::{ReproError, resolve_inputs};
use reproai_evidence::{EvidenceSignals, extract_artifacts, score_evidence};
use reproai_report::{OutputPaths, ReportInputs, assemble, write_report};
use reproai_sources::{SourceClient, SourceError};

use crate::retry::with_retry;

/// Inputs of one run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub paper_id: String,
    pub github_id: String,
    /// Overrides `{output_dir}/{repo-name}.json`.
    pub json_out: Option<PathBuf>,
    /// Overrides `{output_dir}/{repo-name}.html`.
    pub html_out: Option<PathBuf>,
}

/// A written report and where it went.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: Report,
    pub paths: OutputPaths,
}

/// Orchestrates one run against the configured sources.
pub struct Pipeline {
    client: SourceClient,
    config: ReproConfig,
}

impl Pipeline {
    /// # Errors
    ///
    /// Returns [`PipelineError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &ReproConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            client: SourceClient::from_config(config)?,
            config: config.clone(),
        })
    }

    /// Build the report without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Input`] for an invalid identifier (no request
    /// is made) and [`PipelineError::Report`] if assembly fails. Source
    /// failures never error; they degrade sections instead.
    pub async fn build_report(
        &self,
        request: &RunRequest,
    ) -> Result<(Report, OutputPaths), PipelineError> {
        let (paper_id, repo_id) = resolve_inputs(&request.paper_id, &request.github_id)?;
        tracing::info!(%paper_id, repo = %repo_id, "starting run");

        let fetched = self.fetch_all(&paper_id, &repo_id).await;
        let mut unavailable = fetched.unavailable;

        let paper_text = fetched
            .paper
            .as_ref()
            .map(|p| p.full_text.as_str())
            .unwrap_or_default();
        let repo_text = fetched
            .repository
            .as_ref()
            .map(reproai_core::entities::RepositoryRecord::summary_text)
            .unwrap_or_default();

        let mut artifacts = extract_artifacts(paper_text, &repo_text);
        if let Some(entry) = self.resolve_artifacts(&mut artifacts).await {
            unavailable.push(entry);
        }

        let classification = match self.classify(paper_text, &repo_text).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(%e, "classification unavailable");
                unavailable.push(Unavailable::new(ReportSection::Classification, e.to_string()));
                None
            }
        };

        let signals = EvidenceSignals::collect(
            fetched.repository.as_ref(),
            fetched.usage.as_ref(),
            &artifacts,
        );
        let score = score_evidence(&signals, &self.config.scoring);

        let paths = OutputPaths::resolve(
            Path::new(&self.config.general.output_dir),
            &repo_id.to_string(),
            request.json_out.as_deref(),
            request.html_out.as_deref(),
        );
        let report = assemble(
            ReportInputs {
                paper_id: paper_id.to_string(),
                github_id: repo_id.to_string(),
                paper: fetched.paper,
                repository: fetched.repository,
                usage: fetched.usage,
                classification,
                score,
                artifacts,
                unavailable,
            },
            &paths,
            Utc::now(),
        )?;
        Ok((report, paths))
    }

    /// Build the report and write both views.
    ///
    /// # Errors
    ///
    /// See [`Self::build_report`]; also fails if the report cannot be written.
    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome, PipelineError> {
        let (report, paths) = self.build_report(request).await?;

        // Written inline, not on a blocking task: once this future is dropped
        // nothing can still be renaming files into place.
        write_report(&report, &paths)?;

        Ok(RunOutcome { report, paths })
    }

    async fn classify(
        &self,
        paper_text: &str,
        repo_text: &str,
    ) -> Result<ClassificationResult, ReproError> {
        if !self.config.classifier.enabled {
            return Err(ReproError::ClassificationUnavailable(
                "classifier disabled".into(),
            ));
        }
        if paper_text.trim().is_empty() && repo_text.trim().is_empty() {
            return Err(ReproError::ClassificationUnavailable(
                "no paper or repository text to classify".into(),
            ));
        }

        with_retry(&self.config.retry, DataSource::Classifier, || {
            self.client.classify(paper_text, repo_text)
        })
        .await
        .map_err(|e| {
            let reason = match e {
                SourceError::NotConfigured { .. } => {
                    "classifier not configured (set CLASSIFIER_API_KEY)".to_string()
                }
                other => other.to_string(),
            };
            ReproError::ClassificationUnavailable(reason)
        })
    }
}
