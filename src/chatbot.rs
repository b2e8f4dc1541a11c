use crate::corpus::Library;
use crate::graph::{ConversationGraph, SegmentId};
use crate::memory::ConversationMemory;
use crate::qa::{AnswerModel, ModelError};
use crate::ranker::{Hit, rank};
use crate::segment::Timestamp;
use crate::sentiment::{Classify, LexiconClassifier, Sentiment};
use crate::speaker::{Attribute, UNKNOWN_SPEAKER};
use crate::tfidf::TfIdf;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Answer given when no segment matches the question.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find relevant information.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("answer model failed: {0}")]
    Model(#[from] ModelError),
}

/// Reply to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub answer: String,
    pub score: f64,
    pub speaker: String,
    pub sentiment: Sentiment,
    pub source_link: Option<String>,
}

impl Response {
    pub fn fallback() -> Self {
        Self {
            answer: FALLBACK_ANSWER.to_string(),
            score: 0.0,
            speaker: UNKNOWN_SPEAKER.to_string(),
            sentiment: Sentiment::Neutral,
            source_link: None,
        }
    }
}

/// Recording link that starts playback at `timestamp`.
///
/// ```
/// use podcast_rs::chatbot::source_link;
/// let ts = "01:02:03".parse().unwrap();
/// assert_eq!(source_link("https://x/y", &ts), "https://x/y&t=3723");
/// ```
pub fn source_link(base: &str, timestamp: &Timestamp) -> String {
    format!("{base}&t={}", timestamp.seconds())
}

/// Answers questions over a fixed transcript library.
///
/// Built once at startup and shared read-only; conversation memory is owned
/// by the caller.
pub struct Chatbot {
    library: Library,
    graph: ConversationGraph,
    attributor: Box<dyn Attribute>,
    classifier: Box<dyn Classify>,
    model: Arc<dyn AnswerModel>,
    vectorizer: TfIdf,
    neighbor_window: usize,
}

impl Chatbot {
    /// Attribute speakers with the library's own index and classify
    /// sentiment with the lexicon scorer.
    pub fn new(library: Library, model: Arc<dyn AnswerModel>) -> Self {
        let graph = ConversationGraph::build(&library.segment_maps());
        let attributor = Box::new(library.speakers.clone());
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "conversation graph built"
        );
        Self {
            library,
            graph,
            attributor,
            classifier: Box::new(LexiconClassifier),
            model,
            vectorizer: TfIdf::default(),
            neighbor_window: 0,
        }
    }

    pub fn with_attributor(mut self, attributor: impl Attribute + 'static) -> Self {
        self.attributor = Box::new(attributor);
        self
    }

    pub fn with_classifier(mut self, classifier: impl Classify + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Widen the model context by `window` neighbouring segments on each side.
    pub fn with_neighbor_window(mut self, window: usize) -> Self {
        self.neighbor_window = window;
        self
    }

    pub fn with_vectorizer(mut self, vectorizer: TfIdf) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn graph(&self) -> &ConversationGraph {
        &self.graph
    }

    /// Answer `question` and record the exchange in `memory`.
    ///
    /// When nothing matches, the fallback response is returned and memory is
    /// left untouched.
    pub async fn ask(
        &self,
        question: &str,
        memory: &mut ConversationMemory,
    ) -> Result<Response, ChatError> {
        match self.respond(question).await? {
            Some(response) => {
                memory.add(question, response.answer.clone());
                Ok(response)
            }
            None => Ok(Response::fallback()),
        }
    }

    /// Answer `question` without touching any memory. `None` means no
    /// segment matched.
    pub async fn respond(&self, question: &str) -> Result<Option<Response>, ChatError> {
        let Some(hit) = rank(question, &self.library.transcripts, &self.vectorizer) else {
            debug!(%question, "no relevant segment");
            return Ok(None);
        };
        debug!(
            transcript = hit.transcript,
            timestamp = %hit.timestamp,
            similarity = hit.similarity,
            "best segment"
        );
        let context = self.context_for(&hit);
        let answer = self.model.answer(question, &context).await?;
        let speaker = self.attributor.attribute(&answer.text);
        let sentiment = self.classifier.classify(&answer.text).label;
        Ok(Some(Response {
            speaker,
            sentiment,
            source_link: Some(source_link(&hit.source_link, &hit.timestamp)),
            score: answer.score,
            answer: answer.text,
        }))
    }

    fn context_for(&self, hit: &Hit) -> String {
        if self.neighbor_window == 0 {
            return hit.text.clone();
        }
        let id = SegmentId {
            transcript: hit.transcript,
            timestamp: hit.timestamp.clone(),
        };
        let window = self.graph.context_window(&id, self.neighbor_window);
        if window.is_empty() {
            hit.text.clone()
        } else {
            window.join(" ")
        }
    }
}
