//! Question answering over podcast transcripts.
//!
//! Transcripts are split into timestamped segments, the segment closest to a
//! question is found with TF-IDF cosine similarity, and an [`AnswerModel`]
//! extracts the answer. Answers come back with a speaker, a sentiment label
//! and a link that jumps to the moment in the recording.

pub mod chatbot;
pub mod config;
pub mod corpus;
pub mod graph;
pub mod memory;
pub mod qa;
pub mod ranker;
pub mod segment;
pub mod sentiment;
pub mod speaker;
pub mod tfidf;

pub use chatbot::{ChatError, Chatbot, Response, source_link};
pub use config::{ChatConfig, ModelConfig};
pub use corpus::{Library, Transcript};
pub use graph::{ConversationGraph, SegmentId};
pub use memory::{ConversationMemory, MemoryEntry};
pub use qa::{Answer, AnswerModel, FirstSentence, HttpAnswerModel, ModelError};
pub use ranker::Hit;
pub use segment::{SegmentMap, Timestamp};
pub use sentiment::{Classify, LexiconClassifier, Sentiment, SentimentReport};
pub use speaker::{Attribute, HeaderError, SpeakerIndex, UNKNOWN_SPEAKER};
