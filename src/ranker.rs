use crate::corpus::Transcript;
use crate::segment::Timestamp;
use crate::tfidf::{TfIdf, cosine};
use tracing::{debug, trace};

/// Best-matching segment for a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Index of the transcript in load order.
    pub transcript: usize,
    /// Position of the segment within its transcript.
    pub position: usize,
    pub timestamp: Timestamp,
    pub text: String,
    pub source_link: String,
    pub similarity: f64,
}

/// Find the single segment most similar to `question` across all transcripts.
///
/// Each transcript is vectorised on its own, together with the question. The
/// best segment of a transcript is the first one reaching its maximum
/// similarity; it replaces the running best only when strictly greater, so
/// earlier transcripts win ties. Returns `None` when nothing scores above zero.
pub fn rank(question: &str, transcripts: &[Transcript], vectorizer: &TfIdf) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut best_similarity = 0.0;
    for (index, transcript) in transcripts.iter().enumerate() {
        if transcript.segments.is_empty() {
            continue;
        }
        let mut docs: Vec<&str> = Vec::with_capacity(transcript.segments.len() + 1);
        docs.push(question);
        docs.extend(transcript.segments.values().map(String::as_str));
        let vectors = vectorizer.fit_transform(&docs);
        if vectors.iter().all(|v| v.is_empty()) {
            trace!(transcript = %transcript.name, "empty vocabulary");
            continue;
        }
        let Some((query, segments)) = vectors.split_first() else {
            continue;
        };
        let mut local: Option<(usize, f64)> = None;
        for (position, vector) in segments.iter().enumerate() {
            let similarity = cosine(query, vector);
            if local.is_none_or(|(_, s)| similarity > s) {
                local = Some((position, similarity));
            }
        }
        let Some((position, similarity)) = local else {
            continue;
        };
        debug!(transcript = %transcript.name, position, similarity, "transcript best");
        if similarity > best_similarity {
            let Some((timestamp, text)) = transcript.segments.get_index(position) else {
                continue;
            };
            best_similarity = similarity;
            best = Some(Hit {
                transcript: index,
                position,
                timestamp: timestamp.clone(),
                text: text.clone(),
                source_link: transcript.source_link.clone(),
                similarity,
            });
        }
    }
    best
}
