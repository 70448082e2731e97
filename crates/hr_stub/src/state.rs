use std::collections::HashMap;

use chrono::Utc;
use hr_core::{Headline, Rewrite};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::scoring::sentiment_score;

/// Requests an anonymous session may make before it has to log in.
pub const FREE_REQUESTS: u32 = 9;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub anonymous: bool,
    pub requests_remaining: u32,
}

#[derive(Debug, Default)]
pub struct Store {
    pub headlines: Vec<Headline>,
    pub rewrites: Vec<Rewrite>,
    pub sessions: HashMap<String, Session>,
}

impl Store {
    pub fn random_headline(&self) -> Option<&Headline> {
        self.headlines.choose(&mut rand::thread_rng())
    }

    pub fn headline(&self, id: &str) -> Option<&Headline> {
        self.headlines.iter().find(|h| h.id == id)
    }

    /// Open a new anonymous session and return its token.
    pub fn open_session(&mut self, free_requests: u32) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id: Uuid::new_v4().to_string(),
                anonymous: true,
                requests_remaining: free_requests,
            },
        );
        token
    }

    pub fn add_rewrite(&mut self, text: &str, headline: &Headline, user_id: &str) -> Rewrite {
        let score = sentiment_score(text);
        let rewrite = Rewrite {
            id: Uuid::new_v4().to_string(),
            headline_id: headline.id.clone(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            timestamp: Utc::now().to_rfc2822(),
            semantic_score: None,
            semantic_match: 1.0,
            sentiment_score: score,
            sentiment_match: score - headline.sentiment_score,
        };
        self.rewrites.push(rewrite.clone());
        rewrite
    }

    /// Headlines `user_id` rewrote, each carrying only that user's rewrites.
    pub fn history(&self, user_id: &str) -> Vec<Headline> {
        let mut out: Vec<Headline> = Vec::new();
        for rewrite in self.rewrites.iter().filter(|r| r.user_id == user_id) {
            if let Some(existing) = out.iter_mut().find(|h| h.id == rewrite.headline_id) {
                existing.rewrites.get_or_insert_with(Vec::new).push(rewrite.clone());
            } else if let Some(headline) = self.headline(&rewrite.headline_id) {
                let mut headline = headline.clone();
                headline.rewrites = Some(vec![rewrite.clone()]);
                out.push(headline);
            }
        }
        out
    }
}

pub struct AppState {
    pub store: RwLock<Store>,
    pub free_requests: u32,
}

impl AppState {
    pub fn new(headlines: Vec<Headline>) -> Self {
        Self {
            store: RwLock::new(Store {
                headlines,
                ..Store::default()
            }),
            free_requests: FREE_REQUESTS,
        }
    }

    pub fn with_free_requests(mut self, free_requests: u32) -> Self {
        self.free_requests = free_requests;
        self
    }

    /// A handful of headlines to play with.
    pub fn seeded() -> Self {
        let seed = [
            ("Local team wins championship after record season", "BBC", "https://www.bbc.co.uk/sport"),
            ("Markets fall as fears of crisis grow", "Reuters", "https://www.reuters.com/markets"),
            ("City council meets to discuss new bus routes", "AP", "https://apnews.com/"),
            ("Rescue crews celebrate as trapped miners freed", "The Guardian", "https://www.theguardian.com/world"),
        ];
        let today = Utc::now().to_rfc2822();
        let headlines = seed
            .iter()
            .map(|(text, source, url)| headline(text, source, url, &today))
            .collect();
        Self::new(headlines)
    }
}

pub fn headline(text: &str, source: &str, url: &str, date: &str) -> Headline {
    Headline {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        sentiment_score: sentiment_score(text),
        date: date.to_string(),
        source_id: Uuid::new_v4().to_string(),
        source: source.to_string(),
        url: url.to_string(),
        rewrites: None,
    }
}
