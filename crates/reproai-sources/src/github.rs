//! Code-hosting client (GitHub REST API v3).

use chrono::{DateTime, Utc};
use reproai_core::{
    RepoId,
    entities::{RepositoryRecord, RepositorySummary},
    enums::DataSource,
};
use serde::Deserialize;

use crate::{
    SourceClient, base,
    error::SourceError,
    http::{encode_path, get_json, get_text},
    secs,
};

const SERVICE: DataSource = DataSource::Github;
const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

#[derive(Deserialize)]
struct RepoResponse {
    full_name: Option<String>,
    html_url: Option<String>,
    description: Option<String>,
    default_branch: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    /// Actual watchers; `watchers_count` mirrors stars on this API.
    subscribers_count: Option<u64>,
    language: Option<String>,
    pushed_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
}

impl SourceClient {
    /// Fetch repository metadata. The returned summary is empty; see
    /// [`Self::fetch_readme`] and [`Self::fetch_tree`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the repository does not
    /// exist, or the body cannot be parsed.
    pub async fn fetch_repository(&self, repo: &RepoId) -> Result<RepositoryRecord, SourceError> {
        let url = self.repo_url(repo, "");
        tracing::debug!(%repo, %url, "fetching repository");
        let data: RepoResponse = get_json(SERVICE, self.github_get(&url, JSON_MEDIA_TYPE)).await?;
        Ok(data.into_record(repo))
    }

    /// Fetch the README as raw text. A repository without a README yields an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any failure other than 404.
    pub async fn fetch_readme(&self, repo: &RepoId) -> Result<String, SourceError> {
        let url = self.repo_url(repo, "/readme");
        match get_text(SERVICE, self.github_get(&url, RAW_MEDIA_TYPE)).await {
            Ok(text) => Ok(text),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%repo, "repository has no README");
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// List top-level entries; directories carry a trailing `/`. An empty
    /// repository yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any failure other than 404.
    pub async fn fetch_tree(&self, repo: &RepoId) -> Result<Vec<String>, SourceError> {
        let url = self.repo_url(repo, "/contents");
        match get_json::<Vec<ContentEntry>>(SERVICE, self.github_get(&url, JSON_MEDIA_TYPE)).await {
            Ok(entries) => Ok(top_level_names(entries)),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn repo_url(&self, repo: &RepoId, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{suffix}",
            base(&self.github.base_url),
            encode_path(repo.owner()),
            encode_path(repo.name())
        )
    }

    fn github_get(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION)
            .timeout(secs(self.github.timeout_secs));
        if self.github.has_token() {
            req = req.bearer_auth(&self.github.token);
        }
        req
    }
}

impl RepoResponse {
    fn into_record(self, repo: &RepoId) -> RepositoryRecord {
        if let Some(full_name) = &self.full_name
            && !full_name.eq_ignore_ascii_case(&repo.to_string())
        {
            tracing::debug!(%repo, %full_name, "repository was renamed or transferred");
        }

        RepositoryRecord {
            github_id: repo.to_string(),
            html_url: self.html_url,
            description: self.description.filter(|d| !d.trim().is_empty()),
            default_branch: self.default_branch,
            stars: self.stargazers_count,
            forks: self.forks_count,
            open_issues: self.open_issues_count,
            watchers: self.subscribers_count,
            primary_language: self.language,
            updated_at: self.pushed_at,
            summary: RepositorySummary::default(),
        }
    }
}

fn top_level_names(entries: Vec<ContentEntry>) -> Vec<String> {
    let mut names: Vec<String> = entries
        .into_iter()
        .map(|entry| {
            if entry.entry_type == "dir" {
                format!("{}/", entry.name)
            } else {
                entry.name
            }
        })
        .collect();
    names.sort();
    names
}
