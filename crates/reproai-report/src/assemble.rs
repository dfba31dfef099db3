//! Merge upstream outputs into a [`Report`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use reproai_core::entities::{
    ArtifactGroups, ArtifactRef, Assessment, ClassificationResult, EvidenceScore, PaperRecord,
    Report, ReportInfo, ReportMetadata, RepositoryRecord, Unavailable, UsageInsights,
};
use reproai_core::enums::ReportSection;

use crate::ReportError;

/// Everything the pipeline produced for one run.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub paper_id: String,
    pub github_id: String,
    pub paper: Option<PaperRecord>,
    pub repository: Option<RepositoryRecord>,
    pub usage: Option<UsageInsights>,
    pub classification: Option<ClassificationResult>,
    pub score: EvidenceScore,
    pub artifacts: Vec<ArtifactRef>,
    /// Sections already recorded as unavailable, with their causes.
    pub unavailable: Vec<Unavailable>,
}

/// Where the two renders of a report are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

impl OutputPaths {
    /// `{output_dir}/{repo-name}.json` and `.html`, unless overridden.
    #[must_use]
    pub fn resolve(
        output_dir: &Path,
        github_id: &str,
        json_override: Option<&Path>,
        html_override: Option<&Path>,
    ) -> Self {
        let stem = file_stem(github_id);
        Self {
            json: json_override.map_or_else(
                || output_dir.join(format!("{stem}.json")),
                Path::to_path_buf,
            ),
            html: html_override.map_or_else(
                || output_dir.join(format!("{stem}.html")),
                Path::to_path_buf,
            ),
        }
    }
}

/// File stem derived from the repository name (`owner/name` → `name`).
#[must_use]
pub fn file_stem(github_id: &str) -> String {
    let name = github_id
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "report".to_string()
    } else {
        stem.to_string()
    }
}

/// Build the report.
///
/// Sections that are absent but were not recorded by the caller get a
/// generic `unavailable` entry, so a missing value is never silent.
///
/// # Errors
///
/// Returns [`ReportError::Incomplete`] when either input identifier is empty.
pub fn assemble(
    inputs: ReportInputs,
    paths: &OutputPaths,
    generated_at: DateTime<Utc>,
) -> Result<Report, ReportError> {
    if inputs.paper_id.trim().is_empty() {
        return Err(ReportError::Incomplete("paper_id".into()));
    }
    if inputs.github_id.trim().is_empty() {
        return Err(ReportError::Incomplete("github_id".into()));
    }

    let mut unavailable = inputs.unavailable;
    let mut flag = |section: ReportSection, absent: bool, reason: &str| {
        if absent && !unavailable.iter().any(|u| u.section == section) {
            unavailable.push(Unavailable::new(section, reason));
        }
    };
    flag(ReportSection::Paper, inputs.paper.is_none(), "paper metadata not available");
    flag(
        ReportSection::Repository,
        inputs.repository.is_none(),
        "repository metadata not available",
    );
    flag(ReportSection::Usage, inputs.usage.is_none(), "usage insights not available");
    flag(
        ReportSection::Classification,
        inputs.classification.is_none(),
        "classification not available",
    );

    for dimension in inputs.score.missing_dimensions() {
        let reason = format!("{dimension}: no signals available");
        if !unavailable
            .iter()
            .any(|u| u.section == ReportSection::EvidenceDimension && u.reason == reason)
        {
            unavailable.push(Unavailable::new(ReportSection::EvidenceDimension, reason));
        }
    }

    let report = Report {
        metadata: ReportMetadata {
            paper: inputs.paper,
            repository: inputs.repository,
            usage: inputs.usage,
        },
        reproducibility_assessment: Assessment::new(inputs.score, inputs.classification),
        artifacts: ArtifactGroups::from_refs(inputs.artifacts),
        unavailable,
        report: ReportInfo {
            paper_id: inputs.paper_id,
            github_id: inputs.github_id,
            json_path: paths.json.display().to_string(),
            html_path: paths.html.display().to_string(),
            generated_at: generated_at.trunc_subsecs(0),
        },
    };

    if report.is_partial() {
        tracing::info!(
            unavailable = report.unavailable.len(),
            "assembled partial report"
        );
    }
    Ok(report)
}
