use std::sync::Arc;

use async_trait::async_trait;
use hr_core::{Headline, Result, Rewrite, RewriteRequest, ScoreResult};
use url::Url;

pub mod clients;

pub use clients::http::HttpScoringClient;
pub use clients::scripted::ScriptedScoringClient;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// The scoring backend as seen from the page.
///
/// Every call resolves to either the payload or a [`hr_core::Failure`];
/// callers are expected to match on both.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    fn name(&self) -> &str;

    /// `GET /api/headlines/random`
    async fn random_headline(&self) -> ScoreResult<Headline>;

    /// `POST /api/rewrites`
    async fn submit_rewrite(&self, request: &RewriteRequest) -> ScoreResult<Rewrite>;

    /// `DELETE /api/rewrites/{id}`. The response body is ignored.
    async fn delete_rewrite(&self, id: &str) -> ScoreResult<()>;

    /// `GET /api/users/logged_in_user/rewrites`
    async fn user_history(&self) -> ScoreResult<Vec<Headline>>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Without a trailing slash, join would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            user_agent: default_user_agent(),
        })
    }

    /// Resolve an API path below the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

fn default_user_agent() -> String {
    concat!("headline-rewrite/", env!("CARGO_PKG_VERSION")).to_string()
}

pub fn create_client(config: ClientConfig) -> Result<Arc<dyn ScoringClient>> {
    Ok(Arc::new(HttpScoringClient::new(config)?))
}

pub mod prelude {
    pub use super::{create_client, ClientConfig, ScoringClient};
    pub use hr_core::{Failure, Headline, Rewrite, RewriteRequest, ScoreResult};
}
