//! Concurrent metadata fetch stage.

use reproai_core::entities::{PaperRecord, RepositoryRecord, RepositorySummary, Unavailable, UsageInsights};
use reproai_core::enums::{DataSource, ReportSection};
use reproai_core::{PaperId, RepoId, ReproError};
use reproai_sources::SourceError;

use crate::{Pipeline, retry::with_retry};

/// Records gathered from the academic graph, code host and usage insights.
#[derive(Debug)]
pub struct Fetched {
    pub paper: Option<PaperRecord>,
    pub repository: Option<RepositoryRecord>,
    pub usage: Option<UsageInsights>,
    pub unavailable: Vec<Unavailable>,
}

impl Pipeline {
    /// Fetch paper, repository and usage together. Each source has its own
    /// timeout and retry budget; a failure only empties its own slot.
    pub(crate) async fn fetch_all(&self, paper_id: &PaperId, repo_id: &RepoId) -> Fetched {
        let retry = &self.config.retry;
        let (paper, repository, usage) = tokio::join!(
            with_retry(retry, DataSource::Openalex, || self.client.fetch_paper(paper_id)),
            self.fetch_repository_with_summary(repo_id),
            with_retry(retry, DataSource::Insights, || self.client.fetch_usage(paper_id)),
        );

        let mut unavailable = Vec::new();
        let paper = degrade(paper, ReportSection::Paper, &mut unavailable);
        let (repository, summary_failure) = repository;
        let repository = degrade(repository, ReportSection::Repository, &mut unavailable);
        if let Some(reason) = summary_failure {
            unavailable.push(Unavailable::new(ReportSection::RepositorySummary, reason));
        }
        let usage = degrade(usage, ReportSection::Usage, &mut unavailable);

        let fetched = Fetched {
            paper,
            repository,
            usage,
            unavailable,
        };
        tracing::info!(
            paper = fetched.paper.is_some(),
            repository = fetched.repository.is_some(),
            usage = fetched.usage.is_some(),
            "metadata fetch complete"
        );
        fetched
    }

    /// Repository metadata is mandatory for its section; README and tree
    /// failures only empty the summary.
    async fn fetch_repository_with_summary(
        &self,
        repo_id: &RepoId,
    ) -> (Result<RepositoryRecord, SourceError>, Option<String>) {
        let retry = &self.config.retry;
        let (record, readme, tree) = tokio::join!(
            with_retry(retry, DataSource::Github, || self.client.fetch_repository(repo_id)),
            with_retry(retry, DataSource::Github, || self.client.fetch_readme(repo_id)),
            with_retry(retry, DataSource::Github, || self.client.fetch_tree(repo_id)),
        );

        let mut failures = Vec::new();
        let readme = readme.unwrap_or_else(|e| {
            tracing::warn!(repo = %repo_id, %e, "README fetch failed");
            failures.push(format!("readme: {e}"));
            String::new()
        });
        let top_level = tree.unwrap_or_else(|e| {
            tracing::warn!(repo = %repo_id, %e, "file tree fetch failed");
            failures.push(format!("tree: {e}"));
            Vec::new()
        });

        let record = record.map(|mut record| {
            record.summary = RepositorySummary { readme, top_level };
            record
        });
        let summary_failure = (record.is_ok() && !failures.is_empty()).then(|| failures.join("; "));
        (record, summary_failure)
    }
}

/// Keep a successful value, or record why the section is unavailable.
pub(crate) fn degrade<T>(
    result: Result<T, SourceError>,
    section: ReportSection,
    unavailable: &mut Vec<Unavailable>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let reason = ReproError::from(e).to_string();
            tracing::warn!(%section, %reason, "section unavailable");
            unavailable.push(Unavailable::new(section, reason));
            None
        }
    }
}
