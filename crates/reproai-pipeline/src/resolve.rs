//! Bounded artifact resolution against the model-hosting source.

use std::sync::Arc;

use reproai_core::entities::{ArtifactRef, Unavailable};
use reproai_core::enums::{ArtifactSource, DataSource, ReportSection};
use reproai_sources::HubRepoType;

use crate::{Pipeline, retry::with_retry};

impl Pipeline {
    /// Fill download and like counts for Hub artifacts, in place.
    ///
    /// At most `huggingface.max_artifacts` lookups are made, with at most
    /// `huggingface.max_concurrency` in flight. Extraction order is kept.
    pub(crate) async fn resolve_artifacts(&self, artifacts: &mut [ArtifactRef]) -> Option<Unavailable> {
        let limits = &self.config.huggingface;
        let semaphore = Arc::new(tokio::sync::Semaphore::new(limits.max_concurrency.max(1)));
        let mut set = tokio::task::JoinSet::new();
        let mut skipped = 0usize;
        let mut scheduled = 0usize;

        for (idx, artifact) in artifacts.iter().enumerate() {
            if artifact.source != ArtifactSource::Huggingface {
                continue;
            }
            let Some(repo_type) = HubRepoType::for_kind(artifact.kind) else {
                continue;
            };
            if scheduled >= limits.max_artifacts {
                skipped += 1;
                continue;
            }
            scheduled += 1;

            let client = self.client.clone();
            let retry = self.config.retry.clone();
            let sem = semaphore.clone();
            let id = artifact.external_id.clone();
            set.spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                let result = with_retry(&retry, DataSource::Huggingface, || {
                    client.fetch_hub_entry(repo_type, &id)
                })
                .await;
                (idx, id, result)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, _, Ok(entry))) => {
                    artifacts[idx].downloads = entry.downloads;
                    artifacts[idx].likes = entry.likes;
                }
                Ok((_, id, Err(e))) => {
                    tracing::warn!(artifact = %id, %e, "artifact lookup failed");
                    failures.push(format!("{id}: {e}"));
                }
                Err(e) => {
                    tracing::warn!(%e, "artifact lookup task failed");
                    failures.push(e.to_string());
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, limit = limits.max_artifacts, "artifact lookups skipped");
        }
        tracing::info!(scheduled, failed = failures.len(), "artifact resolution complete");

        if failures.is_empty() && skipped == 0 {
            return None;
        }
        failures.sort();
        let mut reason = format!("{} of {scheduled} lookups failed", failures.len());
        if let Some(first) = failures.first() {
            reason.push_str(&format!(" (first: {first})"));
        }
        if skipped > 0 {
            reason.push_str(&format!("; {skipped} skipped over the lookup limit"));
        }
        Some(Unavailable::new(ReportSection::ArtifactResolution, reason))
    }
}
