//! Usage-insights client (citation counts from an OpenAlex-compatible API).

use reproai_core::{PaperId, entities::UsageInsights, enums::DataSource};
use serde::Deserialize;

use crate::{
    SourceClient, base,
    error::SourceError,
    http::{encode_path, get_json},
    secs,
};

const SERVICE: DataSource = DataSource::Insights;

/// Number of most recent reported years summed into `recent_citations`.
const RECENT_YEARS: usize = 2;

#[derive(Deserialize)]
struct InsightsResponse {
    cited_by_count: Option<u64>,
    counts_by_year: Option<Vec<YearCount>>,
}

#[derive(Deserialize)]
struct YearCount {
    year: i32,
    #[serde(default)]
    cited_by_count: u64,
}

impl SourceClient {
    /// Fetch citation counts for a paper.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or the response lacks a
    /// citation count.
    pub async fn fetch_usage(&self, paper_id: &PaperId) -> Result<UsageInsights, SourceError> {
        let mut url = format!(
            "{}/works/{}?select=cited_by_count,counts_by_year",
            base(&self.insights.base_url),
            encode_path(&paper_id.openalex_key())
        );
        if self.openalex.is_polite() {
            url.push_str("&mailto=");
            url.push_str(&urlencoding::encode(&self.openalex.mailto));
        }

        tracing::debug!(%paper_id, %url, "fetching usage insights");
        let data: InsightsResponse = get_json(
            SERVICE,
            self.http
                .get(&url)
                .timeout(secs(self.insights.timeout_secs)),
        )
        .await?;
        data.into_insights()
    }
}

impl InsightsResponse {
    fn into_insights(self) -> Result<UsageInsights, SourceError> {
        let citation_count = self
            .cited_by_count
            .ok_or_else(|| SourceError::parse(SERVICE, "missing cited_by_count"))?;

        let mut years = self.counts_by_year.unwrap_or_default();
        years.sort_by(|a, b| b.year.cmp(&a.year));
        let recent_citations = years
            .iter()
            .take(RECENT_YEARS)
            .map(|y| y.cited_by_count)
            .sum();

        Ok(UsageInsights {
            citation_count,
            recent_citations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "cited_by_count": 180,
        "counts_by_year": [
            {"year": 2023, "cited_by_count": 40},
            {"year": 2025, "cited_by_count": 60},
            {"year": 2024, "cited_by_count": 35},
            {"year": 2022, "cited_by_count": 45}
        ]
    }"#;

    #[test]
    fn recent_citations_sum_latest_two_years() {
        let data: InsightsResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            data.into_insights().unwrap(),
            UsageInsights {
                citation_count: 180,
                recent_citations: 95,
            }
        );
    }

    #[test]
    fn missing_year_breakdown_is_zero_recent() {
        let data: InsightsResponse = serde_json::from_str(r#"{"cited_by_count": 7}"#).unwrap();
        assert_eq!(data.into_insights().unwrap().recent_citations, 0);
    }

    #[test]
    fn missing_count_is_parse_error() {
        let data: InsightsResponse = serde_json::from_str(r#"{"counts_by_year": []}"#).unwrap();
        assert!(matches!(
            data.into_insights(),
            Err(SourceError::Parse {
                service: DataSource::Insights,
                ..
            })
        ));
    }
}
