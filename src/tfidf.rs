//! Term-frequency / inverse-document-frequency vectors.
//!
//! Mirrors the usual scikit-learn defaults: lowercase, tokens of two or more
//! word characters, English stop words, raw counts, smoothed idf and L2
//! normalisation. Tokens are additionally stemmed so inflected forms
//! ("welcomed", "welcome") land on the same term.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::{BTreeMap, HashSet};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    include_str!("stop_words.txt")
        .split_whitespace()
        .collect()
});

/// Sparse, L2-normalised document vector keyed by term.
pub type TermVector = BTreeMap<String, f64>;

/// Whether `word` (already lowercase) is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Split `text` into lowercase, stop-word-free, optionally stemmed terms.
pub fn tokenize(text: &str, stem: bool) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(|t| {
            if stem {
                STEMMER.stem(t).into_owned()
            } else {
                t.to_string()
            }
        })
        .collect()
}

/// Vectorizer settings.
#[derive(Debug, Clone, Copy)]
pub struct TfIdf {
    pub stem: bool,
}

impl Default for TfIdf {
    fn default() -> Self {
        Self { stem: true }
    }
}

impl TfIdf {
    /// Fit on `docs` and return one normalised vector per document.
    ///
    /// Documents with no surviving terms get an empty vector.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Vec<TermVector> {
        let counts: Vec<BTreeMap<String, f64>> = docs
            .iter()
            .map(|d| {
                let mut tf = BTreeMap::new();
                for term in tokenize(d.as_ref(), self.stem) {
                    *tf.entry(term).or_insert(0.0) += 1.0;
                }
                tf
            })
            .collect();

        let mut df: BTreeMap<&str, f64> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *df.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
        }
        let n = docs.len() as f64;
        let idf: BTreeMap<&str, f64> = df
            .into_iter()
            .map(|(t, d)| (t, ((1.0 + n) / (1.0 + d)).ln() + 1.0))
            .collect();

        counts
            .iter()
            .map(|tf| {
                let mut v: TermVector = tf
                    .iter()
                    .map(|(t, c)| (t.clone(), c * idf[t.as_str()]))
                    .collect();
                let norm = v.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    v.values_mut().for_each(|w| *w /= norm);
                }
                v
            })
            .collect()
    }
}

/// Cosine similarity of two vectors; zero if either is empty.
pub fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(t, w)| large.get(t).map(|x| w * x))
        .sum();
    let na = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let nb = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}
