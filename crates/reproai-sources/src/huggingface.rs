//! Model-hosting client (Hugging Face Hub `/api/models` and `/api/datasets`).

use reproai_core::enums::{ArtifactKind, DataSource};
use serde::Deserialize;

use crate::{
    SourceClient, base,
    error::SourceError,
    http::{encode_path, get_json},
    secs,
};

const SERVICE: DataSource = DataSource::Huggingface;

/// Hub repository namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubRepoType {
    Model,
    Dataset,
}

impl HubRepoType {
    /// Hub namespace for an artifact kind; checkpoints are not Hub repositories.
    #[must_use]
    pub const fn for_kind(kind: ArtifactKind) -> Option<Self> {
        match kind {
            ArtifactKind::Model => Some(Self::Model),
            ArtifactKind::Dataset => Some(Self::Dataset),
            ArtifactKind::Checkpoint => None,
        }
    }

    const fn api_segment(self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Dataset => "datasets",
        }
    }
}

/// Usage counters for one Hub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubEntry {
    pub id: String,
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
}

#[derive(Deserialize)]
struct HubRepoResponse {
    id: Option<String>,
    #[serde(rename = "modelId")]
    model_id: Option<String>,
    downloads: Option<u64>,
    likes: Option<u64>,
}

impl SourceClient {
    /// Fetch download and like counts for a Hub model.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the model does not exist,
    /// or the body cannot be parsed.
    pub async fn fetch_model(&self, id: &str) -> Result<HubEntry, SourceError> {
        self.fetch_hub_entry(HubRepoType::Model, id).await
    }

    /// Fetch download and like counts for a Hub dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the dataset does not
    /// exist, or the body cannot be parsed.
    pub async fn fetch_dataset(&self, id: &str) -> Result<HubEntry, SourceError> {
        self.fetch_hub_entry(HubRepoType::Dataset, id).await
    }

    /// Fetch counters for any Hub repository type.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_model`].
    pub async fn fetch_hub_entry(
        &self,
        repo_type: HubRepoType,
        id: &str,
    ) -> Result<HubEntry, SourceError> {
        let url = format!(
            "{}/api/{}/{}",
            base(&self.huggingface.base_url),
            repo_type.api_segment(),
            encode_path(id)
        );
        tracing::debug!(%url, "fetching hub entry");

        let mut req = self
            .http
            .get(&url)
            .timeout(secs(self.huggingface.timeout_secs));
        if self.huggingface.has_token() {
            req = req.bearer_auth(&self.huggingface.token);
        }

        let data: HubRepoResponse = get_json(SERVICE, req).await?;
        Ok(HubEntry {
            id: data.id.or(data.model_id).unwrap_or_else(|| id.to_string()),
            downloads: data.downloads,
            likes: data.likes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_FIXTURE: &str = r#"{
        "_id": "621ffdc036468d709f174338",
        "id": "google/vit-base-patch16-224",
        "modelId": "google/vit-base-patch16-224",
        "downloads": 3210000,
        "likes": 700,
        "pipeline_tag": "image-classification",
        "tags": ["pytorch", "vit"]
    }"#;

    #[test]
    fn parse_model_fixture() {
        let data: HubRepoResponse = serde_json::from_str(MODEL_FIXTURE).unwrap();
        assert_eq!(data.id.as_deref(), Some("google/vit-base-patch16-224"));
        assert_eq!(data.downloads, Some(3_210_000));
        assert_eq!(data.likes, Some(700));
    }

    #[test]
    fn parse_dataset_without_counters() {
        let data: HubRepoResponse =
            serde_json::from_str(r#"{"id": "mvtec/ad", "private": false}"#).unwrap();
        assert_eq!(data.downloads, None);
        assert_eq!(data.likes, None);
    }

    #[test]
    fn repo_type_for_kind() {
        assert_eq!(HubRepoType::for_kind(ArtifactKind::Model), Some(HubRepoType::Model));
        assert_eq!(HubRepoType::for_kind(ArtifactKind::Dataset), Some(HubRepoType::Dataset));
        assert_eq!(HubRepoType::for_kind(ArtifactKind::Checkpoint), None);
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_model() {
        let client = SourceClient::from_config(&reproai_config::ReproConfig::default()).unwrap();
        let entry = client.fetch_model("bert-base-uncased").await.unwrap();
        assert!(entry.downloads.unwrap_or(0) > 0);
    }
}
