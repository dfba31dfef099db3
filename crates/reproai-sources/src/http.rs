//! Shared HTTP response helpers for source clients.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`SourceError::Api`]) and body decoding so the
//! per-service modules stay focused on request construction and response
//! mapping.

use reproai_core::enums::DataSource;
use serde::de::DeserializeOwned;

use crate::error::SourceError;

/// Longest error body kept in [`SourceError::Api`] messages.
const MAX_ERROR_BODY: usize = 300;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`SourceError::RateLimited`] with
///   `Retry-After` parsing (falls back to 60 s if absent or unparseable).
/// - **Non-success status** → [`SourceError::Api`] with status code and
///   truncated response body.
pub async fn check_response(
    service: DataSource,
    resp: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    if resp.status() == 429 {
        return Err(SourceError::RateLimited {
            service,
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(SourceError::Api {
            service,
            status,
            message: truncate(body.trim(), MAX_ERROR_BODY).to_string(),
        });
    }
    Ok(resp)
}

/// Send a request and check its status.
pub async fn send(
    service: DataSource,
    req: reqwest::RequestBuilder,
) -> Result<reqwest::Response, SourceError> {
    let resp = req.send().await.map_err(SourceError::http(service))?;
    check_response(service, resp).await
}

/// Send a request and decode its JSON body.
///
/// Decode failures become [`SourceError::Parse`]; transport failures while
/// reading the body stay [`SourceError::Http`].
pub async fn get_json<T: DeserializeOwned>(
    service: DataSource,
    req: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let body = send(service, req)
        .await?
        .bytes()
        .await
        .map_err(SourceError::http(service))?;
    serde_json::from_slice(&body).map_err(|e| SourceError::parse(service, e.to_string()))
}

/// Send a request and read its body as text.
pub async fn get_text(
    service: DataSource,
    req: reqwest::RequestBuilder,
) -> Result<String, SourceError> {
    send(service, req)
        .await?
        .text()
        .await
        .map_err(SourceError::http(service))
}

/// Percent-encode each `/`-separated segment of an identifier, keeping the
/// separators and `:` scheme markers (`doi:10.1000/xyz`) readable.
pub fn encode_path(id: &str) -> String {
    id.split('/')
        .map(|segment| urlencoding::encode(segment).replace("%3A", ":"))
        .collect::<Vec<_>>()
        .join("/")
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
