//! Display helpers for backend sentiment scores.

use std::fmt;

/// Rounded percentage magnitude of a score in `[-1, 1]`.
///
/// Non-finite input counts as zero.
pub fn certainty_percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    (score.abs() * 100.0).round() as u32
}

/// Same scale as [`certainty_percent`], applied to a match value.
pub fn difference_percent(sentiment_match: f64) -> u32 {
    certainty_percent(sentiment_match)
}

/// Width of the difference bar, as a percentage of its track. Capped at half
/// the track, since a match can span the full [-2, 2] range.
pub fn difference_bar_width(sentiment_match: f64) -> f64 {
    (f64::from(difference_percent(sentiment_match)) / 2.0).min(50.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affect {
    Positive(u32),
    Negative(u32),
    Neutral,
}

impl Affect {
    /// Rounding happens on the percentage, so |score| < 0.005 is neutral.
    pub fn from_score(score: f64) -> Self {
        let certainty = certainty_percent(score);
        if certainty == 0 {
            Affect::Neutral
        } else if score > 0.0 {
            Affect::Positive(certainty)
        } else {
            Affect::Negative(certainty)
        }
    }

    pub fn certainty(&self) -> u32 {
        match self {
            Affect::Positive(n) | Affect::Negative(n) => *n,
            Affect::Neutral => 0,
        }
    }
}

impl fmt::Display for Affect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affect::Positive(n) => write!(f, "Positive ({}% certainty)", n),
            Affect::Negative(n) => write!(f, "Negative ({}% certainty)", n),
            Affect::Neutral => f.write_str("Neutral"),
        }
    }
}

pub fn affect_label(score: f64) -> String {
    Affect::from_score(score).to_string()
}
