use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Citation and usage signals fetched separately from the paper metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UsageInsights {
    pub citation_count: u64,
    /// Citations received in the two most recent calendar years reported.
    pub recent_citations: u64,
}
