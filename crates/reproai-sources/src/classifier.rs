//! Reproducibility classifier client (OpenAI-compatible chat completions).
//!
//! The service receives the paper text and the repository summary and must
//! answer with a JSON object `{"class": "I"|"II"|"III", "rationale": "..."}`.
//! Fenced or chatty answers are tolerated as long as one JSON object or a
//! bare label can be recovered.

use reproai_core::{
    entities::ClassificationResult,
    enums::{DataSource, ReproClass},
};
use serde::Deserialize;

use crate::{
    SourceClient,
    error::SourceError,
    http::{get_json, truncate},
    secs,
};

const SERVICE: DataSource = DataSource::Classifier;

const SYSTEM_PROMPT: &str = "You assess the computational reproducibility of \
machine-learning research. Given a paper and a summary of its code repository, \
assign exactly one class:\n\
I: code, data and trained weights are released and results can be reproduced as published.\n\
II: partial release; reproduction needs missing pieces or substantial effort.\n\
III: the computational claims cannot be reproduced from released artifacts.\n\
Answer with a single JSON object: {\"class\": \"I\" | \"II\" | \"III\", \"rationale\": \"<two sentences>\"}.";

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct LabelAnswer {
    #[serde(alias = "label", alias = "reproducibility_class")]
    class: serde_json::Value,
    #[serde(default, alias = "reason", alias = "explanation")]
    rationale: Option<String>,
}

impl SourceClient {
    /// Classify a paper/repository pair.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotConfigured`] when the classifier is disabled
    /// or lacks an API key, [`SourceError::Parse`] when no label can be
    /// recovered from the answer, and the usual HTTP errors otherwise.
    pub async fn classify(
        &self,
        paper_text: &str,
        repo_summary: &str,
    ) -> Result<ClassificationResult, SourceError> {
        if !self.classifier.is_configured() {
            return Err(SourceError::NotConfigured { service: SERVICE });
        }

        let input = build_input(paper_text, repo_summary, self.classifier.max_input_chars);
        let body = serde_json::json!({
            "model": self.classifier.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": input},
            ],
            "temperature": 0.0,
        });

        let url = self.classifier_endpoint();
        tracing::debug!(%url, model = %self.classifier.model, chars = input.chars().count(), "requesting classification");

        let resp: ChatResponse = get_json(
            SERVICE,
            self.http
                .post(&url)
                .bearer_auth(&self.classifier.api_key)
                .json(&body)
                .timeout(secs(self.classifier.timeout_secs)),
        )
        .await?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SourceError::parse(SERVICE, "response has no message content"))?;

        parse_answer(&content)
    }

    /// Resolve the chat completions endpoint from the configured base URL.
    fn classifier_endpoint(&self) -> String {
        let base = self.classifier.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }
}

/// Join paper text and repository summary, capped at `max_chars` characters.
fn build_input(paper_text: &str, repo_summary: &str, max_chars: usize) -> String {
    let joined = format!("{}\n\n{}", paper_text.trim(), repo_summary.trim());
    truncate(&joined, max_chars).to_string()
}

/// Recover a classification from the model's message content.
fn parse_answer(content: &str) -> Result<ClassificationResult, SourceError> {
    if let Some(json) = extract_json_object(content) {
        let answer: LabelAnswer = serde_json::from_str(json)
            .map_err(|e| SourceError::parse(SERVICE, format!("invalid answer object: {e}")))?;
        let label = match &answer.class {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };
        let class = ReproClass::parse_label(&label)
            .ok_or_else(|| SourceError::parse(SERVICE, format!("unknown class label '{label}'")))?;
        return Ok(ClassificationResult {
            class,
            rationale: answer.rationale.unwrap_or_default().trim().to_string(),
        });
    }

    ReproClass::parse_label(content)
        .map(|class| ClassificationResult {
            class,
            rationale: String::new(),
        })
        .ok_or_else(|| SourceError::parse(SERVICE, "answer contains no class label"))
}

/// Slice from the first `{` to the last `}`, which skips code fences and prose.
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHAT_FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "{\"class\": \"II\", \"rationale\": \"Code is public but weights are not.\"}"
                },
                "finish_reason": "stop"
            }
        ]
    }"#;

    #[test]
    fn parse_chat_fixture() {
        let resp: ChatResponse = serde_json::from_str(CHAT_FIXTURE).unwrap();
        let content = resp.choices[0].message.content.as_deref().unwrap();
        assert_eq!(
            parse_answer(content).unwrap(),
            ClassificationResult {
                class: ReproClass::II,
                rationale: "Code is public but weights are not.".into(),
            }
        );
    }

    #[test]
    fn parse_fenced_answer_with_alias_keys() {
        let content = "Here you go:\n```json\n{\"label\": \"Class III\", \"reason\": \"No code.\"}\n```";
        let result = parse_answer(content).unwrap();
        assert_eq!(result.class, ReproClass::III);
        assert_eq!(result.rationale, "No code.");
    }

    #[test]
    fn parse_numeric_class() {
        let result = parse_answer(r#"{"class": 1, "rationale": "All released."}"#).unwrap();
        assert_eq!(result.class, ReproClass::I);
    }

    #[test]
    fn parse_bare_label() {
        let result = parse_answer("II").unwrap();
        assert_eq!(result.class, ReproClass::II);
        assert_eq!(result.rationale, "");
    }

    #[test]
    fn reject_unknown_label() {
        let err = parse_answer(r#"{"class": "IV", "rationale": "?"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse { service: DataSource::Classifier, .. }));
        assert!(parse_answer("I cannot decide.").is_err());
    }

    #[test]
    fn input_is_truncated_on_char_boundary() {
        let input = build_input("ééééé", "repo", 3);
        assert_eq!(input, "ééé");
        assert_eq!(build_input(" paper ", " repo ", 100), "paper\n\nrepo");
    }

    #[test]
    fn endpoint_appends_chat_completions_once() {
        let mut config = reproai_config::ReproConfig::default();
        config.classifier.base_url = "http://localhost:8080/v1/".into();
        let client = SourceClient::from_config(&config).unwrap();
        assert_eq!(client.classifier_endpoint(), "http://localhost:8080/v1/chat/completions");

        config.classifier.base_url = "http://localhost:8080/v1/chat/completions".into();
        let client = SourceClient::from_config(&config).unwrap();
        assert_eq!(client.classifier_endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn unconfigured_classifier_fails_without_request() {
        let client = SourceClient::from_config(&reproai_config::ReproConfig::default()).unwrap();
        let err = client.classify("paper", "repo").await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured { service: DataSource::Classifier }));
    }
}
