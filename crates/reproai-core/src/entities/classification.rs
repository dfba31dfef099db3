use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ReproClass;

/// Label and rationale returned by the external text classifier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassificationResult {
    pub class: ReproClass,
    pub rationale: String,
}
