//! Academic graph client (OpenAlex `/works`).

use std::collections::HashMap;

use reproai_core::{PaperId, entities::PaperRecord, enums::DataSource};
use serde::Deserialize;

use crate::{
    SourceClient, base,
    error::SourceError,
    http::{encode_path, get_json},
    secs,
};

const SERVICE: DataSource = DataSource::Openalex;

#[derive(Deserialize)]
struct WorkResponse {
    id: Option<String>,
    display_name: Option<String>,
    title: Option<String>,
    publication_year: Option<i32>,
    doi: Option<String>,
    authorships: Option<Vec<Authorship>>,
    primary_location: Option<Location>,
    host_venue: Option<NamedRef>,
    abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
}

#[derive(Deserialize)]
struct Authorship {
    author: Option<NamedRef>,
}

#[derive(Deserialize)]
struct Location {
    source: Option<NamedRef>,
}

#[derive(Deserialize)]
struct NamedRef {
    display_name: Option<String>,
}

impl SourceClient {
    /// Fetch one work from the academic graph.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the work does not exist
    /// (404 surfaces as [`SourceError::Api`]), or the body cannot be parsed.
    pub async fn fetch_paper(&self, paper_id: &PaperId) -> Result<PaperRecord, SourceError> {
        let mut url = format!(
            "{}/works/{}",
            base(&self.openalex.base_url),
            encode_path(&paper_id.openalex_key())
        );
        if self.openalex.is_polite() {
            url.push_str("?mailto=");
            url.push_str(&urlencoding::encode(&self.openalex.mailto));
        }

        tracing::debug!(%paper_id, %url, "fetching paper");
        let work: WorkResponse = get_json(
            SERVICE,
            self.http
                .get(&url)
                .timeout(secs(self.openalex.timeout_secs)),
        )
        .await?;

        Ok(work.into_record(paper_id))
    }
}

impl WorkResponse {
    fn into_record(self, paper_id: &PaperId) -> PaperRecord {
        let title = self
            .display_name
            .or(self.title)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let authors = self
            .authorships
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| a.author.and_then(|author| author.display_name))
            .filter(|name| !name.trim().is_empty())
            .collect();

        let venue = self
            .primary_location
            .and_then(|loc| loc.source)
            .and_then(|src| src.display_name)
            .or_else(|| self.host_venue.and_then(|v| v.display_name));

        let doi = self.doi.map(|d| {
            d.strip_prefix("https://doi.org/")
                .unwrap_or(&d)
                .to_ascii_lowercase()
        });

        let abstract_text = self
            .abstract_inverted_index
            .map(|index| rebuild_abstract(&index))
            .unwrap_or_default();
        let full_text = if abstract_text.is_empty() {
            title.clone()
        } else {
            format!("{title}\n\n{abstract_text}")
        };

        PaperRecord {
            paper_id: paper_id.to_string(),
            source_id: self.id,
            title,
            published_year: self.publication_year,
            authors,
            venue,
            doi,
            full_text,
        }
    }
}

/// Rebuild abstract text from an inverted index (`word -> [positions]`).
fn rebuild_abstract(index: &HashMap<String, Vec<usize>>) -> String {
    let mut positioned: Vec<(usize, &str)> = index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |&pos| (pos, word.as_str())))
        .collect();
    positioned.sort_unstable();
    positioned
        .into_iter()
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ")
}
