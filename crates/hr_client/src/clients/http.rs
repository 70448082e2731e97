use std::fmt;

use async_trait::async_trait;
use hr_core::{
    Failure, Headline, HeadlineEnvelope, HistoryEnvelope, Result, Rewrite, RewriteEnvelope,
    RewriteRequest, ScoreResult,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{ClientConfig, ScoringClient};

pub struct HttpScoringClient {
    client: Client,
    config: ClientConfig,
}

impl HttpScoringClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        // The backend tracks anonymous request quotas through a session cookie.
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> ScoreResult<Url> {
        self.config
            .endpoint(path)
            .map_err(|e| Failure::Transport(e.to_string()))
    }

    /// Decode either body shape; the HTTP status is deliberately not consulted.
    async fn decode<T: DeserializeOwned>(response: Response) -> ScoreResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("⬅️ {} ({} bytes)", status, bytes.len());
        serde_json::from_slice(&bytes)
            .map_err(|e| Failure::Transport(format!("invalid response body ({}): {}", status, e)))
    }
}

impl fmt::Debug for HttpScoringClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpScoringClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.config.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn random_headline(&self) -> ScoreResult<Headline> {
        let url = self.url("/api/headlines/random")?;
        debug!("➡️ GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode::<HeadlineEnvelope>(response).await?.into_result()
    }

    async fn submit_rewrite(&self, request: &RewriteRequest) -> ScoreResult<Rewrite> {
        let url = self.url("/api/rewrites")?;
        debug!("➡️ POST {} for headline {}", url, request.headline_id);
        let response = self.client.post(url).json(request).send().await?;
        Self::decode::<RewriteEnvelope>(response).await?.into_result()
    }

    async fn delete_rewrite(&self, id: &str) -> ScoreResult<()> {
        let url = self.url(&format!("/api/rewrites/{}", id))?;
        debug!("➡️ DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        if !response.status().is_success() {
            warn!("Delete of rewrite {} answered {}", id, response.status());
        }
        Ok(())
    }

    async fn user_history(&self) -> ScoreResult<Vec<Headline>> {
        let url = self.url("/api/users/logged_in_user/rewrites")?;
        debug!("➡️ GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::decode::<HistoryEnvelope>(response).await?.into_result()
    }
}
