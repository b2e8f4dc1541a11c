//! Lexicon sentiment scoring with keyword overrides.
//!
//! Polarity comes from the VADER lexicon and rules; a few keywords then
//! override the label.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use vader_sentiment::SentimentIntensityAnalyzer;

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;

static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

static ANALYZER: Lazy<SentimentIntensityAnalyzer<'static>> =
    Lazy::new(SentimentIntensityAnalyzer::new);

/// Overall tone of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Sarcastic,
    Humorous,
    Angry,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Sarcastic => "sarcastic",
            Sentiment::Humorous => "humorous",
            Sentiment::Angry => "angry",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proportions of negative, neutral and positive tokens plus the normalised
/// compound score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub label: Sentiment,
    pub scores: PolarityScores,
}

/// Labels the tone of an answer.
pub trait Classify: Send + Sync {
    fn classify(&self, text: &str) -> SentimentReport;
}

/// Lowercase and strip everything but word characters and whitespace.
pub fn preprocess(text: &str) -> String {
    PUNCT_RE.replace_all(&text.to_lowercase(), "").into_owned()
}

/// VADER polarity of already preprocessed text.
pub fn polarity_scores(text: &str) -> PolarityScores {
    if text.trim().is_empty() {
        return PolarityScores::default();
    }
    let raw = ANALYZER.polarity_scores(text);
    let get = |key: &str| raw.get(key).copied().unwrap_or_default();
    PolarityScores {
        neg: get("neg"),
        neu: get("neu"),
        pos: get("pos"),
        compound: get("compound"),
    }
}

/// Base polarity from the compound score, then keyword overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    fn label(compound: f64, text: &str) -> Sentiment {
        if text.contains("just kidding") || text.contains("sarcastic") {
            Sentiment::Sarcastic
        } else if text.contains("funny") || text.contains("laugh") {
            Sentiment::Humorous
        } else if text.contains("angry") || text.contains("furious") {
            Sentiment::Angry
        } else if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl Classify for LexiconClassifier {
    fn classify(&self, text: &str) -> SentimentReport {
        let text = preprocess(text);
        let scores = polarity_scores(&text);
        SentimentReport {
            label: Self::label(scores.compound, &text),
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> Sentiment {
        LexiconClassifier.classify(text).label
    }

    #[test]
    fn conversational_tokens_carry_valence() {
        assert_eq!(label("haha"), Sentiment::Positive);
        assert_eq!(label("lol"), Sentiment::Positive);
        assert_eq!(label("No."), Sentiment::Negative);
    }

    #[test]
    fn preprocess_strips_punctuation() {
        assert_eq!(preprocess("Great, isn't it?!"), "great isnt it");
    }

    #[test]
    fn base_polarity() {
        assert_eq!(label("This is a wonderful, amazing episode!"), Sentiment::Positive);
        assert_eq!(label("That was a terrible, awful idea."), Sentiment::Negative);
        assert_eq!(label("The episode was recorded on Tuesday."), Sentiment::Neutral);
    }

    #[test]
    fn sarcastic_overrides_strong_positive() {
        let report = LexiconClassifier.classify("I love this, it is wonderful and great. Sarcastic, obviously.");
        assert!(report.scores.compound >= 0.05);
        assert_eq!(report.label, Sentiment::Sarcastic);
        assert_eq!(label("Best show ever, just kidding"), Sentiment::Sarcastic);
    }

    #[test]
    fn override_priority() {
        assert_eq!(label("That was funny but I am angry"), Sentiment::Humorous);
        assert_eq!(label("We laughed a lot"), Sentiment::Humorous);
        assert_eq!(label("He was furious"), Sentiment::Angry);
        assert_eq!(label("Just kidding, that was funny"), Sentiment::Sarcastic);
    }

    #[test]
    fn negation_flips_polarity() {
        let plain = polarity_scores("good");
        let negated = polarity_scores("not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
        assert!(polarity_scores(&preprocess("It isn't good")).compound < 0.0);
    }

    #[test]
    fn boosters_intensify() {
        let plain = polarity_scores("good");
        let boosted = polarity_scores("very good");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn but_shifts_weight_to_the_second_clause() {
        assert!(polarity_scores("good but terrible").compound < 0.0);
    }

    #[test]
    fn empty_text_is_neutral() {
        let report = LexiconClassifier.classify("");
        assert_eq!(report.label, Sentiment::Neutral);
        assert_eq!(report.scores.compound, 0.0);
    }

    #[test]
    fn label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sentiment::Humorous).unwrap(), "\"humorous\"");
        assert_eq!(Sentiment::Angry.to_string(), "angry");
    }
}
