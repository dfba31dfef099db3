//! Entity structs for every record a reproai run produces.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! written report round-trips through JSON and validates against its schema.

mod artifact;
mod classification;
mod evidence;
mod paper;
mod report;
mod repository;
mod usage;

pub use artifact::ArtifactRef;
pub use classification::ClassificationResult;
pub use evidence::EvidenceScore;
pub use paper::PaperRecord;
pub use report::{
    ArtifactGroups, Assessment, Report, ReportInfo, ReportMetadata, Unavailable,
};
pub use repository::{RepositoryRecord, RepositorySummary};
pub use usage::UsageInsights;
