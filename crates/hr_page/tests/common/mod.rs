use hr_core::{Headline, Rewrite};
use serde_json::json;

pub fn headline(id: &str, text: &str, score: f64) -> Headline {
    serde_json::from_value(json!({
        "id": id,
        "text": text,
        "sentiment_score": score,
        "date": "Tue, 18 Oct 2022 00:00:00 GMT",
        "source_id": "s1",
        "source": "BBC",
        "url": "https://a"
    }))
    .unwrap()
}

pub fn rewrite(id: &str, headline_id: &str, text: &str) -> Rewrite {
    serde_json::from_value(json!({
        "id": id,
        "headline_id": headline_id,
        "user_id": "u1",
        "text": text,
        "timestamp": "Tue, 18 Oct 2022 12:00:00 GMT",
        "semantic_match": 1.0,
        "sentiment_score": 0.1,
        "sentiment_match": -0.3
    }))
    .unwrap()
}
