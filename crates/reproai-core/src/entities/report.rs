use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ArtifactRef, ClassificationResult, EvidenceScore, PaperRecord, RepositoryRecord, UsageInsights};
use crate::enums::{ArtifactKind, Dimension, MissingSignalPolicy, ReproClass, ReportSection};

/// Final output of a run. Written verbatim as JSON and rendered as HTML.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub reproducibility_assessment: Assessment,
    pub artifacts: ArtifactGroups,
    /// Sections that could not be produced, with the reason. Never silently empty
    /// when something upstream failed.
    pub unavailable: Vec<Unavailable>,
    pub report: ReportInfo,
}

impl Report {
    /// Whether any section was degraded.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportMetadata {
    pub paper: Option<PaperRecord>,
    pub repository: Option<RepositoryRecord>,
    pub usage: Option<UsageInsights>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Assessment {
    /// Absent when the classifier was unavailable.
    pub class: Option<ReproClass>,
    pub rationale: Option<String>,
    pub rwe_score: f64,
    pub rwe_dimensions: BTreeMap<Dimension, Option<f64>>,
    pub rwe_weights: BTreeMap<Dimension, f64>,
    pub missing_signal_policy: MissingSignalPolicy,
}

impl Assessment {
    #[must_use]
    pub fn new(score: EvidenceScore, classification: Option<ClassificationResult>) -> Self {
        let (class, rationale) = classification
            .map_or((None, None), |c| (Some(c.class), Some(c.rationale)));
        Self {
            class,
            rationale,
            rwe_score: score.overall,
            rwe_dimensions: score.dimensions,
            rwe_weights: score.weights,
            missing_signal_policy: score.policy,
        }
    }
}

/// Artifacts split by kind, each list in order of first mention.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArtifactGroups {
    pub datasets: Vec<ArtifactRef>,
    pub models: Vec<ArtifactRef>,
    pub checkpoints: Vec<ArtifactRef>,
}

impl ArtifactGroups {
    #[must_use]
    pub fn from_refs(refs: Vec<ArtifactRef>) -> Self {
        let mut groups = Self::default();
        for artifact in refs {
            match artifact.kind {
                ArtifactKind::Dataset => groups.datasets.push(artifact),
                ArtifactKind::Model => groups.models.push(artifact),
                ArtifactKind::Checkpoint => groups.checkpoints.push(artifact),
            }
        }
        groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len() + self.models.len() + self.checkpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(label, items)` pairs in rendering order.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &[ArtifactRef]); 3] {
        [
            ("Datasets", self.datasets.as_slice()),
            ("Models", self.models.as_slice()),
            ("Checkpoints", self.checkpoints.as_slice()),
        ]
    }
}

/// A degraded section and why.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Unavailable {
    pub section: ReportSection,
    pub reason: String,
}

impl Unavailable {
    pub fn new(section: ReportSection, reason: impl Into<String>) -> Self {
        Self {
            section,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportInfo {
    pub paper_id: String,
    pub github_id: String,
    pub json_path: String,
    pub html_path: String,
    pub generated_at: DateTime<Utc>,
}
