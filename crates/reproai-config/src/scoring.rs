//! Evidence scoring configuration.

use std::collections::BTreeMap;

use reproai_core::enums::{Dimension, MissingSignalPolicy};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Treatment of dimensions whose signals are unavailable.
    #[serde(default)]
    pub missing_signals: MissingSignalPolicy,

    #[serde(default)]
    pub weights: ScoringWeights,
}

/// Fixed weights of the linear combination. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoringWeights {
    #[serde(default = "default_repository_activity")]
    pub repository_activity: f64,
    #[serde(default = "default_artifact_downloads")]
    pub artifact_downloads: f64,
    #[serde(default = "default_citations")]
    pub citations: f64,
    #[serde(default = "default_community_adoption")]
    pub community_adoption: f64,
}

const fn default_repository_activity() -> f64 {
    0.35
}

const fn default_artifact_downloads() -> f64 {
    0.20
}

const fn default_citations() -> f64 {
    0.30
}

const fn default_community_adoption() -> f64 {
    0.15
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            repository_activity: default_repository_activity(),
            artifact_downloads: default_artifact_downloads(),
            citations: default_citations(),
            community_adoption: default_community_adoption(),
        }
    }
}

impl ScoringWeights {
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::RepositoryActivity => self.repository_activity,
            Dimension::ArtifactDownloads => self.artifact_downloads,
            Dimension::Citations => self.citations,
            Dimension::CommunityAdoption => self.community_adoption,
        }
    }

    pub fn as_map(&self) -> BTreeMap<Dimension, f64> {
        Dimension::ALL.into_iter().map(|dim| (dim, self.get(dim))).collect()
    }

    /// Reject non-finite or negative weights and sums other than 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dim in Dimension::ALL {
            let weight = self.get(dim);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("scoring.weights.{dim}"),
                    reason: format!("must be a finite non-negative number, got {weight}"),
                });
            }
        }

        let sum: f64 = Dimension::ALL.iter().map(|dim| self.get(*dim)).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                field: "scoring.weights".to_string(),
                reason: format!("weights must sum to 1, got {sum}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!(weights.validate().is_ok());
        assert_eq!(weights.as_map().len(), 4);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let weights = ScoringWeights {
            citations: 0.5,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "scoring.weights"));
    }

    #[test]
    fn rejects_negative_weight() {
        let weights = ScoringWeights {
            repository_activity: -0.35,
            citations: 1.0,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "scoring.weights.repository_activity")
        );
    }

    #[test]
    fn rejects_nan_weight() {
        let weights = ScoringWeights {
            community_adoption: f64::NAN,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn default_policy_is_renormalize() {
        assert_eq!(ScoringConfig::default().missing_signals, MissingSignalPolicy::Renormalize);
    }
}
