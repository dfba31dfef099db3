use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One academic work as returned by the academic graph.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaperRecord {
    /// Canonical paper identifier the record was fetched with.
    pub paper_id: String,
    /// Source-native identifier (e.g. `https://openalex.org/W4390875033`).
    pub source_id: Option<String>,
    pub title: String,
    pub published_year: Option<i32>,
    /// Author display names in authorship order; never contains empty names.
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub doi: Option<String>,
    /// Title plus reconstructed abstract. Input to extraction and classification.
    #[serde(default)]
    pub full_text: String,
}
