//! OpenAI Chat Completions responder adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_event_stream, StreamItem};
use crate::application::ports::{ChunkCallback, Responder, ResponderError};
use crate::domain::interview::{Speaker, Transcript};
use crate::domain::recording::Duration;
use crate::infrastructure::http::HttpFailure;

/// OpenAI API base URL
pub(crate) const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Terminal payload of a streamed completion
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Chat role for a transcript speaker.
/// Steering instructions go in as system messages so the model never
/// reads them as something the candidate said.
fn openai_role(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::System | Speaker::ControlInstruction => "system",
        Speaker::Candidate => "user",
        Speaker::Interviewer => "assistant",
    }
}

/// OpenAI responder using streamed chat completions
pub struct OpenAiResponder {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiResponder {
    /// Create a new OpenAI responder with the given API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::default_request_timeout(),
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different API host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, transcript: &Transcript) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: transcript
                .turns()
                .iter()
                .map(|turn| ChatMessage {
                    role: openai_role(turn.speaker()),
                    content: turn.text().to_string(),
                })
                .collect(),
            stream: true,
        }
    }

    /// Parse one streamed event
    fn parse_event(payload: &str) -> Result<StreamItem, ResponderError> {
        if payload.trim() == DONE_MARKER {
            return Ok(StreamItem::Done);
        }

        let chunk: ChatCompletionChunk = serde_json::from_str(payload)
            .map_err(|e| ResponderError::ParseError(e.to_string()))?;

        Ok(chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
            .map(StreamItem::Text)
            .unwrap_or(StreamItem::Skip))
    }
}

#[async_trait]
impl Responder for OpenAiResponder {
    async fn complete(
        &self,
        transcript: &Transcript,
        on_chunk: Option<ChunkCallback>,
    ) -> Result<String, ResponderError> {
        let body = self.build_request(transcript);
        debug!(model = %self.model, messages = body.messages.len(), "openai request");

        let response = self
            .client
            .post(self.api_url())
            .timeout(self.timeout.as_std())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(HttpFailure::from_transport)?;

        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }

        read_event_stream(response, on_chunk, Self::parse_event).await
    }
}
