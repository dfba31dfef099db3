//! Real-world-evidence scoring.
//!
//! Each dimension is a log-normalized signal in `[0, 1]`:
//!
//! ```text
//! log_norm(x, c)       = min(ln(1 + x) / ln(1 + c), 1)
//! repository_activity  = 0.7 · log_norm(stars, 10 000) + 0.3 · log_norm(forks, 2 000)
//! artifact_downloads   = log_norm(Σ downloads, 1 000 000)
//! citations            = log_norm(cited_by, 1 000)
//! community_adoption   = log_norm(watchers + Σ likes, 1 000)
//! ```
//!
//! The overall score is the weighted sum. Missing dimensions are handled by
//! the configured [`MissingSignalPolicy`].

use std::collections::BTreeMap;

use reproai_config::ScoringConfig;
use reproai_core::entities::{ArtifactRef, EvidenceScore, RepositoryRecord, UsageInsights};
use reproai_core::enums::{Dimension, MissingSignalPolicy};

const STARS_CEILING: f64 = 10_000.0;
const FORKS_CEILING: f64 = 2_000.0;
const DOWNLOADS_CEILING: f64 = 1_000_000.0;
const CITATIONS_CEILING: f64 = 1_000.0;
const ADOPTION_CEILING: f64 = 1_000.0;

const STARS_SHARE: f64 = 0.7;
const FORKS_SHARE: f64 = 0.3;

/// Scores are rounded to this many decimal places.
const PRECISION: f64 = 10_000.0;

/// Raw inputs to the scorer. `None` means the signal was not observed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvidenceSignals {
    pub stars: Option<f64>,
    pub forks: Option<f64>,
    pub watchers: Option<f64>,
    /// Sum of downloads over artifacts that resolved a count.
    pub artifact_downloads: Option<f64>,
    /// Sum of likes over artifacts that resolved a count.
    pub artifact_likes: Option<f64>,
    pub citations: Option<f64>,
}

impl EvidenceSignals {
    /// Gather signals from whatever upstream records are available.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn collect(
        repository: Option<&RepositoryRecord>,
        usage: Option<&UsageInsights>,
        artifacts: &[ArtifactRef],
    ) -> Self {
        let sum = |values: Vec<u64>| -> Option<f64> {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().map(|&v| v as f64).sum())
            }
        };

        Self {
            stars: repository.map(|r| r.stars as f64),
            forks: repository.map(|r| r.forks as f64),
            watchers: repository.and_then(|r| r.watchers).map(|w| w as f64),
            artifact_downloads: sum(artifacts.iter().filter_map(|a| a.downloads).collect()),
            artifact_likes: sum(artifacts.iter().filter_map(|a| a.likes).collect()),
            citations: usage.map(|u| u.citation_count as f64),
        }
    }
}

/// `min(ln(1 + x) / ln(1 + ceiling), 1)`, with NaN and negative inputs
/// treated as 0 and positive infinity as saturated.
#[must_use]
pub fn log_norm(x: f64, ceiling: f64) -> f64 {
    let x = sanitize(x);
    if x.is_infinite() {
        return 1.0;
    }
    let ceiling = sanitize(ceiling);
    if ceiling <= 0.0 || !ceiling.is_finite() {
        return 0.0;
    }
    (x.ln_1p() / ceiling.ln_1p()).clamp(0.0, 1.0)
}

/// Per-dimension scores; `None` for dimensions without signals.
#[must_use]
pub fn dimension_scores(signals: &EvidenceSignals) -> BTreeMap<Dimension, Option<f64>> {
    let repository_activity = match (signals.stars, signals.forks) {
        (Some(stars), Some(forks)) => Some(
            STARS_SHARE * log_norm(stars, STARS_CEILING)
                + FORKS_SHARE * log_norm(forks, FORKS_CEILING),
        ),
        _ => None,
    };

    let artifact_downloads = signals
        .artifact_downloads
        .map(|d| log_norm(d, DOWNLOADS_CEILING));

    let citations = signals.citations.map(|c| log_norm(c, CITATIONS_CEILING));

    let community_adoption = match (signals.watchers, signals.artifact_likes) {
        (None, None) => None,
        (watchers, likes) => Some(log_norm(
            sanitize(watchers.unwrap_or(0.0)) + sanitize(likes.unwrap_or(0.0)),
            ADOPTION_CEILING,
        )),
    };

    BTreeMap::from([
        (Dimension::RepositoryActivity, repository_activity.map(round)),
        (Dimension::ArtifactDownloads, artifact_downloads.map(round)),
        (Dimension::Citations, citations.map(round)),
        (Dimension::CommunityAdoption, community_adoption.map(round)),
    ])
}

/// Compute the weighted evidence score under the configured policy.
#[must_use]
pub fn score_evidence(signals: &EvidenceSignals, config: &ScoringConfig) -> EvidenceScore {
    let dimensions = dimension_scores(signals);
    let weights = config.weights.as_map();
    let policy = config.missing_signals;

    let weighted = |dim: &Dimension| weights.get(dim).copied().unwrap_or(0.0);

    let overall = match policy {
        MissingSignalPolicy::Zero => dimensions
            .iter()
            .map(|(dim, value)| weighted(dim) * value.unwrap_or(0.0))
            .sum::<f64>(),
        MissingSignalPolicy::Renormalize => {
            let (total, weight_sum) = dimensions
                .iter()
                .filter_map(|(dim, value)| value.map(|v| (weighted(dim), v)))
                .fold((0.0, 0.0), |(total, sum), (w, v)| (w.mul_add(v, total), sum + w));
            if weight_sum > 0.0 {
                total / weight_sum
            } else {
                0.0
            }
        }
    };

    let missing = dimensions.values().filter(|v| v.is_none()).count();
    if missing > 0 {
        tracing::debug!(missing, %policy, "scoring with missing dimensions");
    }

    EvidenceScore {
        overall: round(sanitize(overall).clamp(0.0, 1.0)),
        dimensions,
        weights,
        policy,
    }
}

fn sanitize(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 { 0.0 } else { x }
}

fn round(x: f64) -> f64 {
    (x * PRECISION).round() / PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reproai_config::ScoringWeights;

    fn config(policy: MissingSignalPolicy) -> ScoringConfig {
        ScoringConfig {
            missing_signals: policy,
            weights: ScoringWeights::default(),
        }
    }

    fn full_signals() -> EvidenceSignals {
        EvidenceSignals {
            stars: Some(412.0),
            forks: Some(97.0),
            watchers: Some(21.0),
            artifact_downloads: Some(3_210_000.0),
            artifact_likes: Some(700.0),
            citations: Some(180.0),
        }
    }

    #[test]
    fn log_norm_bounds_and_edges() {
        assert!(log_norm(0.0, 1000.0).abs() < f64::EPSILON);
        assert!((log_norm(1000.0, 1000.0) - 1.0).abs() < f64::EPSILON);
        assert!((log_norm(1e12, 1000.0) - 1.0).abs() < f64::EPSILON);
        assert!(log_norm(f64::NAN, 1000.0).abs() < f64::EPSILON);
        assert!(log_norm(-5.0, 1000.0).abs() < f64::EPSILON);
        assert!((log_norm(f64::INFINITY, 1000.0) - 1.0).abs() < f64::EPSILON);
        assert!(log_norm(10.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repository_activity_is_deterministic_for_412_stars_97_forks() {
        let signals = EvidenceSignals {
            stars: Some(412.0),
            forks: Some(97.0),
            ..EvidenceSignals::default()
        };
        let first = dimension_scores(&signals)[&Dimension::RepositoryActivity];
        let second = dimension_scores(&signals)[&Dimension::RepositoryActivity];
        assert_eq!(first, second);

        let expected = 0.7f64.mul_add(
            413f64.ln() / 10_001f64.ln(),
            0.3 * (98f64.ln() / 2_001f64.ln()),
        );
        let value = first.unwrap();
        assert!((value - expected).abs() < 1e-4, "{value} vs {expected}");
        assert!((value - 0.6387).abs() < 1e-9);
    }

    #[test]
    fn full_signals_score_every_dimension() {
        let score = score_evidence(&full_signals(), &config(MissingSignalPolicy::Renormalize));
        assert!(score.missing_dimensions().is_empty());
        assert_eq!(score.dimensions[&Dimension::ArtifactDownloads], Some(1.0));
        assert_eq!(score.dimensions[&Dimension::Citations], Some(0.7525));

        let zero = score_evidence(&full_signals(), &config(MissingSignalPolicy::Zero));
        assert!((score.overall - zero.overall).abs() < 1e-9);
    }

    #[test]
    fn renormalize_rescales_available_weights() {
        let signals = EvidenceSignals {
            citations: Some(1000.0),
            ..EvidenceSignals::default()
        };
        let score = score_evidence(&signals, &config(MissingSignalPolicy::Renormalize));
        assert!((score.overall - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            score.missing_dimensions(),
            vec![
                Dimension::RepositoryActivity,
                Dimension::ArtifactDownloads,
                Dimension::CommunityAdoption,
            ]
        );
        assert!((score.weights[&Dimension::Citations] - 0.30).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_policy_keeps_missing_weight() {
        let signals = EvidenceSignals {
            citations: Some(1000.0),
            ..EvidenceSignals::default()
        };
        let score = score_evidence(&signals, &config(MissingSignalPolicy::Zero));
        assert!((score.overall - 0.30).abs() < 1e-9);
        assert_eq!(score.policy, MissingSignalPolicy::Zero);
    }

    #[test]
    fn nothing_available_scores_zero_under_both_policies() {
        for policy in [MissingSignalPolicy::Renormalize, MissingSignalPolicy::Zero] {
            let score = score_evidence(&EvidenceSignals::default(), &config(policy));
            assert!(score.overall.abs() < f64::EPSILON);
            assert_eq!(score.missing_dimensions().len(), 4);
        }
    }

    #[test]
    fn community_adoption_uses_likes_without_watchers() {
        let signals = EvidenceSignals {
            artifact_likes: Some(1000.0),
            ..EvidenceSignals::default()
        };
        assert_eq!(
            dimension_scores(&signals)[&Dimension::CommunityAdoption],
            Some(1.0)
        );
    }

    #[test]
    fn collect_sums_resolved_artifacts_only() {
        use reproai_core::enums::{ArtifactKind, ArtifactSource, MentionOrigin};

        let artifact = |downloads, likes| ArtifactRef {
            kind: ArtifactKind::Model,
            name: "m".into(),
            source: ArtifactSource::Huggingface,
            external_id: "o/m".into(),
            url: None,
            downloads,
            likes,
            mentioned_in: MentionOrigin::Paper,
        };
        let usage = UsageInsights {
            citation_count: 12,
            recent_citations: 3,
        };

        let signals = EvidenceSignals::collect(
            None,
            Some(&usage),
            &[artifact(Some(10), None), artifact(None, None), artifact(Some(5), Some(2))],
        );
        assert_eq!(signals.artifact_downloads, Some(15.0));
        assert_eq!(signals.artifact_likes, Some(2.0));
        assert_eq!(signals.citations, Some(12.0));
        assert_eq!(signals.stars, None);

        let unresolved = EvidenceSignals::collect(None, None, &[artifact(None, None)]);
        assert_eq!(unresolved.artifact_downloads, None);
        assert_eq!(unresolved.artifact_likes, None);
    }

    #[test]
    fn missing_subscriber_count_leaves_adoption_unobserved() {
        let repo = RepositoryRecord {
            github_id: "a/b".into(),
            html_url: None,
            description: None,
            default_branch: None,
            stars: 412,
            forks: 97,
            open_issues: 0,
            watchers: None,
            primary_language: None,
            updated_at: None,
            summary: reproai_core::entities::RepositorySummary::default(),
        };

        let signals = EvidenceSignals::collect(Some(&repo), None, &[]);
        assert_eq!(signals.watchers, None);
        assert_eq!(signals.stars, Some(412.0));
        assert_eq!(dimension_scores(&signals)[&Dimension::CommunityAdoption], None);

        let watched = RepositoryRecord {
            watchers: Some(21),
            ..repo
        };
        let signals = EvidenceSignals::collect(Some(&watched), None, &[]);
        assert_eq!(signals.watchers, Some(21.0));
    }

    /// Small deterministic generator so the sweep is reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            self.0 >> 33
        }

        fn signal(&mut self) -> Option<f64> {
            match self.next() % 8 {
                0 => None,
                1 => Some(0.0),
                2 => Some(f64::NAN),
                3 => Some(-((self.next() % 1000) as f64)),
                4 => Some(f64::INFINITY),
                5 => Some(1e18 * (self.next() % 100) as f64),
                _ => Some((self.next() % 50_000) as f64),
            }
        }
    }

    #[test]
    fn randomized_sweep_stays_in_unit_interval() {
        let mut rng = Lcg(0x5eed);
        for _ in 0..5_000 {
            let signals = EvidenceSignals {
                stars: rng.signal(),
                forks: rng.signal(),
                watchers: rng.signal(),
                artifact_downloads: rng.signal(),
                artifact_likes: rng.signal(),
                citations: rng.signal(),
            };
            for policy in [MissingSignalPolicy::Renormalize, MissingSignalPolicy::Zero] {
                let score = score_evidence(&signals, &config(policy));
                assert!(
                    (0.0..=1.0).contains(&score.overall),
                    "overall {} for {signals:?}",
                    score.overall
                );
                for (dim, value) in &score.dimensions {
                    if let Some(v) = value {
                        assert!((0.0..=1.0).contains(v), "{dim} = {v} for {signals:?}");
                    }
                }
                assert_eq!(score, score_evidence(&signals, &config(policy)));
            }
        }
    }
}
