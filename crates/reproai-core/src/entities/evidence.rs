use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Dimension, MissingSignalPolicy};

/// Aggregated real-world-evidence score.
///
/// `overall` and every present sub-score lie in `[0, 1]`. A dimension whose
/// signals were unavailable maps to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvidenceScore {
    pub overall: f64,
    pub dimensions: BTreeMap<Dimension, Option<f64>>,
    /// Configured weights (before any renormalization).
    pub weights: BTreeMap<Dimension, f64>,
    pub policy: MissingSignalPolicy,
}

impl EvidenceScore {
    /// Dimensions whose signals were unavailable, in declaration order.
    #[must_use]
    pub fn missing_dimensions(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter_map(|(dim, score)| score.is_none().then_some(*dim))
            .collect()
    }
}
