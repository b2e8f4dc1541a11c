//! HTTP front end for the podcast chatbot.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use podcast_rs::{Chatbot, ConversationMemory, MemoryEntry, Sentiment};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

pub const WELCOME: &str = "Welcome to the Podcast Chatbot! Ask me questions about the podcasts.";

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

/// Body of a successful `/chat` reply.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub user_input: String,
    pub response: String,
    pub sentiment: Sentiment,
    pub speaker: String,
    pub source_link: Option<String>,
}

/// Chatbot plus the conversation memory shared by every client.
pub struct ChatService {
    bot: Chatbot,
    memory: Mutex<ConversationMemory>,
}

impl ChatService {
    pub fn new(bot: Chatbot, memory: ConversationMemory) -> Self {
        Self {
            bot,
            memory: Mutex::new(memory),
        }
    }

    /// Routes `/`, `/chat` and `/memory` with permissive CORS.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/", get(Self::welcome))
            .route("/chat", post(Self::chat))
            .route("/memory", get(Self::memory).delete(Self::clear_memory))
            .layer(CorsLayer::permissive())
            .with_state(self)
    }

    async fn welcome() -> &'static str {
        WELCOME
    }

    async fn chat(State(this): State<Arc<Self>>, body: Bytes) -> Response {
        let message = serde_json::from_slice::<ChatRequest>(&body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty());
        let Some(message) = message else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "No message provided"})),
            )
                .into_response();
        };
        info!(%message, "chat request");
        match this.bot.respond(&message).await {
            Ok(reply) => {
                let reply = match reply {
                    Some(r) => {
                        this.memory.lock().await.add(message.as_str(), r.answer.as_str());
                        r
                    }
                    None => podcast_rs::Response::fallback(),
                };
                info!(answer = %reply.answer, speaker = %reply.speaker, "chat response");
                Json(ChatReply {
                    user_input: message,
                    response: reply.answer,
                    sentiment: reply.sentiment,
                    speaker: reply.speaker,
                    source_link: reply.source_link,
                })
                .into_response()
            }
            Err(e) => {
                error!(error = %e, "chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Error processing the request."})),
                )
                    .into_response()
            }
        }
    }

    async fn memory(State(this): State<Arc<Self>>) -> Json<Vec<MemoryEntry>> {
        Json(this.memory.lock().await.get_all())
    }

    async fn clear_memory(State(this): State<Arc<Self>>) -> StatusCode {
        this.memory.lock().await.clear();
        StatusCode::NO_CONTENT
    }
}
