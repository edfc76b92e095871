use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::Transcription;

const DEFAULT_BASE_URL: &str = "https://api.sofer.ai/v1";

/// Configuration for the Sofer transcription API
#[derive(Debug, Clone)]
pub struct SoferConfig {
    /// API token (from SOFER_API_TOKEN env var)
    pub api_token: String,
    /// API root, e.g. "https://api.sofer.ai/v1"
    pub base_url: String,
}

impl SoferConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("SOFER_API_TOKEN")
            .context("SOFER_API_TOKEN environment variable not set")?;
        let base_url =
            std::env::var("SOFER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_token,
            base_url,
        })
    }

    pub fn new(api_token: String) -> Self {
        Self {
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Client for fetching finished transcriptions
pub struct SoferClient {
    client: Client,
    config: SoferConfig,
}

impl SoferClient {
    pub fn new(config: SoferConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn transcription_url(&self, uid: &str) -> String {
        format!(
            "{}/transcriptions/{}",
            self.config.base_url.trim_end_matches('/'),
            uid
        )
    }

    /// Fetch a transcription by its id
    pub async fn fetch_transcription(&self, uid: &str) -> Result<Transcription> {
        let url = self.transcription_url(uid);
        debug!("Fetching transcription {}", uid);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .context("Failed to send request to transcription API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to fetch transcription {}: {} - {}", uid, status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse transcription response")
    }
}
