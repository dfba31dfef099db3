use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One code repository as returned by the code-hosting API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Canonical `owner/name`.
    pub github_id: String,
    pub html_url: Option<String>,
    pub description: Option<String>,
    pub default_branch: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// `None` when the API omitted the subscriber count.
    pub watchers: Option<u64>,
    pub primary_language: Option<String>,
    /// Last push.
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summary: RepositorySummary,
}

/// README text and top-level file tree of a repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepositorySummary {
    #[serde(default)]
    pub readme: String,
    /// Top-level entry names; directories carry a trailing `/`.
    #[serde(default)]
    pub top_level: Vec<String>,
}

impl RepositorySummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readme.trim().is_empty() && self.top_level.is_empty()
    }

    /// Flatten into the text scanned for artifacts and sent to the classifier.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        if !self.top_level.is_empty() {
            text.push_str("Files: ");
            text.push_str(&self.top_level.join(", "));
            text.push('\n');
        }
        if !self.readme.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(self.readme.trim());
        }
        text
    }
}

impl RepositoryRecord {
    /// Description followed by the flattened summary.
    #[must_use]
    pub fn summary_text(&self) -> String {
        let body = self.summary.to_text();
        match self.description.as_deref().map(str::trim) {
            Some(desc) if !desc.is_empty() && body.is_empty() => desc.to_string(),
            Some(desc) if !desc.is_empty() => format!("{desc}\n\n{body}"),
            _ => body,
        }
    }
}
