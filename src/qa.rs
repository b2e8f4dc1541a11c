//! Extractive question-answering backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Span extracted from a context along with the model's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model returned no answer")]
    Empty,
    #[error("{0}")]
    Other(String),
}

/// Picks the answer to `question` out of `context`.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer, ModelError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply {
    One(Answer),
    Many(Vec<Answer>),
}

/// Calls a question-answering inference endpoint.
///
/// Sends `{"inputs": {"question", "context"}}` and accepts either a single
/// `{answer, score}` object or a list whose first element is the answer.
#[derive(Clone, Debug)]
pub struct HttpAnswerModel {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpAnswerModel {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnswerModel for HttpAnswerModel {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer, ModelError> {
        let body = serde_json::json!({
            "inputs": {"question": question, "context": context}
        });
        trace!(target: "qa", url = %self.url, body = %body, "qa request");
        let mut req = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let answer = match resp.json::<Reply>().await? {
            Reply::One(a) => a,
            Reply::Many(list) => list.into_iter().next().ok_or(ModelError::Empty)?,
        };
        debug!(target: "qa", answer = %answer.text, score = answer.score, "qa answer");
        Ok(answer)
    }
}

/// Offline model answering with the first sentence of the context.
#[derive(Clone, Debug, Default)]
pub struct FirstSentence;

#[async_trait]
impl AnswerModel for FirstSentence {
    async fn answer(&self, _question: &str, context: &str) -> Result<Answer, ModelError> {
        let text = first_sentence(context);
        if text.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(Answer { text, score: 1.0 })
    }
}

/// Leading sentence of `text`, through its first `.`, `!` or `?`.
///
/// [`FirstSentence`] answers with this span, so speaker attribution still
/// finds it verbatim in the transcript.
///
/// ```
/// use podcast_rs::qa::first_sentence;
/// assert_eq!(first_sentence("Hi there. Bye."), "Hi there.");
/// assert_eq!(first_sentence("  no stop "), "no stop");
/// ```
pub fn first_sentence(text: &str) -> String {
    let end = text.find(['.', '!', '?']).map_or(text.len(), |i| i + 1);
    text[..end].trim().to_string()
}
