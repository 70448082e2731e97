use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use hr_core::{Failure, Headline, Rewrite, RewriteRequest, ScoreResult};
use tokio::sync::Mutex;

use crate::ScoringClient;

/// A request the scripted client has seen.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    RandomHeadline,
    SubmitRewrite(RewriteRequest),
    DeleteRewrite(String),
    UserHistory,
}

#[derive(Default)]
struct Script {
    headlines: VecDeque<ScoreResult<Headline>>,
    rewrites: VecDeque<ScoreResult<Rewrite>>,
    deletes: VecDeque<ScoreResult<()>>,
    histories: VecDeque<ScoreResult<Vec<Headline>>>,
    log: Vec<Recorded>,
}

/// Answers from queues of canned responses, in order.
///
/// An empty queue answers with a transport failure, except deletes which
/// succeed.
#[derive(Default)]
pub struct ScriptedScoringClient {
    script: Mutex<Script>,
}

impl fmt::Debug for ScriptedScoringClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedScoringClient").finish()
    }
}

fn exhausted<T>(what: &str) -> ScoreResult<T> {
    Err(Failure::Transport(format!("no scripted {} response", what)))
}

impl ScriptedScoringClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_headline(&self, response: ScoreResult<Headline>) {
        self.script.lock().await.headlines.push_back(response);
    }

    pub async fn push_rewrite(&self, response: ScoreResult<Rewrite>) {
        self.script.lock().await.rewrites.push_back(response);
    }

    pub async fn push_delete(&self, response: ScoreResult<()>) {
        self.script.lock().await.deletes.push_back(response);
    }

    pub async fn push_history(&self, response: ScoreResult<Vec<Headline>>) {
        self.script.lock().await.histories.push_back(response);
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<Recorded> {
        self.script.lock().await.log.clone()
    }
}

#[async_trait]
impl ScoringClient for ScriptedScoringClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn random_headline(&self) -> ScoreResult<Headline> {
        let mut script = self.script.lock().await;
        script.log.push(Recorded::RandomHeadline);
        script.headlines.pop_front().unwrap_or_else(|| exhausted("headline"))
    }

    async fn submit_rewrite(&self, request: &RewriteRequest) -> ScoreResult<Rewrite> {
        let mut script = self.script.lock().await;
        script.log.push(Recorded::SubmitRewrite(request.clone()));
        script.rewrites.pop_front().unwrap_or_else(|| exhausted("rewrite"))
    }

    async fn delete_rewrite(&self, id: &str) -> ScoreResult<()> {
        let mut script = self.script.lock().await;
        script.log.push(Recorded::DeleteRewrite(id.to_string()));
        script.deletes.pop_front().unwrap_or(Ok(()))
    }

    async fn user_history(&self) -> ScoreResult<Vec<Headline>> {
        let mut script = self.script.lock().await;
        script.log.push(Recorded::UserHistory);
        script.histories.pop_front().unwrap_or_else(|| exhausted("history"))
    }
}
