use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ArtifactKind, ArtifactSource, MentionOrigin};

/// A dataset, model, or checkpoint referenced by the paper or repository.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArtifactRef {
    pub kind: ArtifactKind,
    /// Short display name (last path segment of the external id).
    pub name: String,
    pub source: ArtifactSource,
    /// Identifier resolvable against `source` (`owner/name` on the Hub, or the
    /// path/URL as written for checkpoints).
    pub external_id: String,
    pub url: Option<String>,
    /// Download count reported by the model-hosting source, when resolved.
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
    pub mentioned_in: MentionOrigin,
}

impl ArtifactRef {
    /// Deduplication key: kind plus case-folded external id.
    #[must_use]
    pub fn dedup_key(&self) -> (ArtifactKind, String) {
        (self.kind, self.external_id.to_ascii_lowercase())
    }
}
