//! Ordinal and categorical enums shared across reproai.
//!
//! All enums serialize as `snake_case` strings except [`ReproClass`], whose
//! wire form is the roman numeral label (`"I"`, `"II"`, `"III"`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReproClass
// ---------------------------------------------------------------------------

/// Ordinal reproducibility class assigned by the external classifier.
///
/// ```text
/// I   → code, data and trained weights released; results reproducible as published
/// II  → partial release; reproduction needs missing pieces or substantial effort
/// III → computational claims cannot be reproduced from released artifacts
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ReproClass {
    #[serde(rename = "I")]
    I,
    #[serde(rename = "II")]
    II,
    #[serde(rename = "III")]
    III,
}

impl ReproClass {
    pub const ALL: [Self; 3] = [Self::I, Self::II, Self::III];

    /// Roman numeral label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
        }
    }

    /// Position on the ordinal scale (1 = most reproducible).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
        }
    }

    /// Parse a classifier label.
    ///
    /// Accepts the roman numerals, their arabic equivalents, and a leading
    /// `class` word (`"Class II"`, `"class-2"`). Anything else is rejected.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let trimmed = label.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '.');
        let lowered = trimmed.to_ascii_lowercase();
        let bare = lowered
            .strip_prefix("class")
            .map_or(lowered.as_str(), |rest| {
                rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_' || c == ':')
            });

        match bare {
            "i" | "1" => Some(Self::I),
            "ii" | "2" => Some(Self::II),
            "iii" | "3" => Some(Self::III),
            _ => None,
        }
    }
}

impl fmt::Display for ReproClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// Kind of artifact referenced by a paper or repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Dataset,
    Model,
    Checkpoint,
}

impl ArtifactKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dataset => "dataset",
            Self::Model => "model",
            Self::Checkpoint => "checkpoint",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactSource / MentionOrigin
// ---------------------------------------------------------------------------

/// System an artifact identifier resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSource {
    /// Hugging Face Hub model or dataset repository.
    Huggingface,
    /// A file path or URL taken verbatim from the repository or paper.
    Repository,
}

impl ArtifactSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Huggingface => "huggingface",
            Self::Repository => "repository",
        }
    }
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input text an artifact was first mentioned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MentionOrigin {
    Paper,
    Repository,
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// Named dimension of the real-world-evidence score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    RepositoryActivity,
    ArtifactDownloads,
    Citations,
    CommunityAdoption,
}

impl Dimension {
    pub const ALL: [Self; 4] = [
        Self::RepositoryActivity,
        Self::ArtifactDownloads,
        Self::Citations,
        Self::CommunityAdoption,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RepositoryActivity => "repository_activity",
            Self::ArtifactDownloads => "artifact_downloads",
            Self::Citations => "citations",
            Self::CommunityAdoption => "community_adoption",
        }
    }

    /// Human-readable label used by the HTML view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RepositoryActivity => "Repository activity",
            Self::ArtifactDownloads => "Artifact downloads",
            Self::Citations => "Citations",
            Self::CommunityAdoption => "Community adoption",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MissingSignalPolicy
// ---------------------------------------------------------------------------

/// How the evidence scorer treats a dimension whose signals are unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MissingSignalPolicy {
    /// Exclude the dimension and rescale the remaining weights to sum to 1.
    #[default]
    Renormalize,
    /// Keep the dimension's weight and score it as 0.
    Zero,
}

impl MissingSignalPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Renormalize => "renormalize",
            Self::Zero => "zero",
        }
    }
}

impl fmt::Display for MissingSignalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// External service the pipeline talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Academic graph (OpenAlex works).
    Openalex,
    /// Code hosting (GitHub REST API).
    Github,
    /// Model hosting (Hugging Face Hub).
    Huggingface,
    /// Citation and usage insights.
    Insights,
    /// Text-classification service.
    Classifier,
}

impl DataSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Openalex => "openalex",
            Self::Github => "github",
            Self::Huggingface => "huggingface",
            Self::Insights => "insights",
            Self::Classifier => "classifier",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportSection
// ---------------------------------------------------------------------------

/// Part of the report that can be degraded when an upstream step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Paper,
    Repository,
    RepositorySummary,
    Usage,
    ArtifactResolution,
    Classification,
    EvidenceDimension,
}

impl ReportSection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Repository => "repository",
            Self::RepositorySummary => "repository_summary",
            Self::Usage => "usage",
            Self::ArtifactResolution => "artifact_resolution",
            Self::Classification => "classification",
            Self::EvidenceDimension => "evidence_dimension",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
