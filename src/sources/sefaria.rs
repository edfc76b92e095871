use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use super::{SourceText, TextSource};
use crate::error::AlignError;

const DEFAULT_BASE_URL: &str = "https://www.sefaria.org/api/texts";

/// Configuration for the Sefaria texts API
#[derive(Debug, Clone)]
pub struct SefariaConfig {
    /// Texts endpoint; the reference is appended as a path segment
    pub base_url: String,
}

impl Default for SefariaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SefariaConfig {
    /// Create config from environment variables (SEFARIA_API_URL is optional)
    pub fn from_env() -> Self {
        std::env::var("SEFARIA_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|base_url| Self { base_url })
            .unwrap_or_default()
    }
}

/// Sefaria texts API client
pub struct SefariaClient {
    client: Client,
    config: SefariaConfig,
}

impl SefariaClient {
    pub fn new(config: SefariaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// URL for a reference, with the reference percent-encoded as one path segment
    pub fn text_url(&self, reference: &str) -> Option<Url> {
        let mut url = Url::parse(self.config.base_url.trim_end_matches('/')).ok()?;
        url.path_segments_mut().ok()?.push(reference);
        url.query_pairs_mut()
            .append_pair("commentary", "0")
            .append_pair("pad", "0");
        Some(url)
    }
}

impl TextSource for SefariaClient {
    async fn fetch_text(&self, reference: &str) -> Result<SourceText, AlignError> {
        let url = self
            .text_url(reference)
            .ok_or_else(|| AlignError::InvalidUrl {
                reference: reference.to_string(),
                base_url: self.config.base_url.clone(),
            })?;

        debug!("Fetching {} from {}", reference, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AlignError::Request {
                reference: reference.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AlignError::Fetch {
                reference: reference.to_string(),
                status: response.status(),
            });
        }

        let body: Value = response.json().await.map_err(|source| AlignError::Request {
            reference: reference.to_string(),
            source,
        })?;

        parse_text_response(reference, &body)
    }
}

/// Extract the Hebrew segment texts and section ref from a texts API response.
///
/// `he` must be an array of strings; a `null` item becomes an empty segment
/// so later segments keep their numbers. `sectionRef` falls back to the
/// requested reference when absent.
pub fn parse_text_response(reference: &str, body: &Value) -> Result<SourceText, AlignError> {
    let he = body
        .get("he")
        .and_then(Value::as_array)
        .ok_or_else(|| AlignError::shape(reference, "missing 'he' array"))?;

    let segments = he
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::String(text) => Ok(text.clone()),
            // padded sections hold null for missing segments
            Value::Null => Ok(String::new()),
            _ => Err(AlignError::shape(
                reference,
                format!("'he' entry {} is not a string", i),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let base_ref = body
        .get("sectionRef")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .unwrap_or(reference)
        .to_string();

    Ok(SourceText { base_ref, segments })
}
