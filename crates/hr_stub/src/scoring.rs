//! Stand-in sentiment scoring: a tiny polarity lexicon.

const POSITIVE: &[&str] = &[
    "win", "wins", "won", "triumph", "triumphs", "great", "good", "success", "succeeds", "hope",
    "gain", "gains", "rise", "rises", "record", "celebrate", "celebrates", "rescue", "peace",
    "growth", "best", "happy",
];

const NEGATIVE: &[&str] = &[
    "lose", "loses", "lost", "fall", "falls", "crash", "crisis", "war", "death", "dies", "fear",
    "fears", "fail", "fails", "worst", "attack", "scandal", "collapse", "bad", "terrible", "sad",
    "threat",
];

/// Polarity in [-1, 1]: (positive - negative) / matched words.
pub fn sentiment_score(text: &str) -> f64 {
    let (mut positive, mut negative) = (0u32, 0u32);
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if POSITIVE.contains(&word.as_str()) {
            positive += 1;
        } else if NEGATIVE.contains(&word.as_str()) {
            negative += 1;
        }
    }
    let total = positive + negative;
    if total == 0 {
        return 0.0;
    }
    (f64::from(positive) - f64::from(negative)) / f64::from(total)
}
