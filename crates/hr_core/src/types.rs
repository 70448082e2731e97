use serde::{Deserialize, Serialize};

use crate::error::{Failure, ScoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub id: String,
    pub text: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    /// Only present in history responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrites: Option<Vec<Rewrite>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rewrite {
    pub id: String,
    pub headline_id: String,
    #[serde(default)]
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f64>,
    #[serde(default)]
    pub semantic_match: f64,
    pub sentiment_score: f64,
    pub sentiment_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub text: String,
    pub headline_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /api/headlines/random`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HeadlineEnvelope {
    Failure(ErrorResponse),
    /// `headline` must be present; only an explicit `null` means "none left".
    Success {
        #[serde(deserialize_with = "Option::deserialize")]
        headline: Option<Headline>,
    },
}

/// Body of `POST /api/rewrites`. Older backends answered with the bare rewrite.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RewriteEnvelope {
    Failure(ErrorResponse),
    Wrapped { rewrite: Rewrite },
    Bare(Rewrite),
}

/// Body of `GET /api/users/logged_in_user/rewrites`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryEnvelope {
    Failure(ErrorResponse),
    Success(Vec<Headline>),
}

impl HeadlineEnvelope {
    pub fn into_result(self) -> ScoreResult<Headline> {
        match self {
            HeadlineEnvelope::Failure(e) => Err(Failure::application(e.error)),
            HeadlineEnvelope::Success { headline: Some(h) } => Ok(h),
            HeadlineEnvelope::Success { headline: None } => {
                Err(Failure::application("No headline available."))
            }
        }
    }
}

impl RewriteEnvelope {
    pub fn into_result(self) -> ScoreResult<Rewrite> {
        match self {
            RewriteEnvelope::Failure(e) => Err(Failure::application(e.error)),
            RewriteEnvelope::Wrapped { rewrite } | RewriteEnvelope::Bare(rewrite) => Ok(rewrite),
        }
    }
}

impl HistoryEnvelope {
    pub fn into_result(self) -> ScoreResult<Vec<Headline>> {
        match self {
            HistoryEnvelope::Failure(e) => Err(Failure::application(e.error)),
            HistoryEnvelope::Success(headlines) => Ok(headlines),
        }
    }
}
