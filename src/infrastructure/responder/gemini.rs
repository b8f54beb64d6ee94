//! Gemini API responder adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{read_event_stream, StreamItem};
use crate::application::ports::{ChunkCallback, Responder, ResponderError};
use crate::domain::interview::{Speaker, Transcript};
use crate::domain::recording::Duration;
use crate::infrastructure::http::HttpFailure;

/// Gemini API base URL
pub(crate) const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

// Response types for Gemini API (one per SSE event)

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini role for a transcript speaker; `None` for the system turn
fn gemini_role(speaker: Speaker) -> Option<&'static str> {
    match speaker {
        Speaker::System => None,
        Speaker::Candidate | Speaker::ControlInstruction => Some("user"),
        Speaker::Interviewer => Some("model"),
    }
}

/// Gemini API responder using `streamGenerateContent`
pub struct GeminiResponder {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiResponder {
    /// Create a new Gemini responder with the given API key and model
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

    /// Build the streaming API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the request body, merging adjacent turns that share a role
    fn build_request(transcript: &Transcript) -> GenerateContentRequest {
        let mut contents: Vec<Content> = Vec::new();

        for turn in transcript.conversation() {
            let Some(role) = gemini_role(turn.speaker()) else {
                continue;
            };
            let part = TextPart {
                text: turn.text().to_string(),
            };
            match contents.last_mut() {
                Some(last) if last.role == role => last.parts.push(part),
                _ => contents.push(Content {
                    role,
                    parts: vec![part],
                }),
            }
        }

        GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![TextPart {
                    text: transcript.system_prompt().to_string(),
                }],
            }),
        }
    }

    /// Parse one streamed event
    fn parse_event(payload: &str) -> Result<StreamItem, ResponderError> {
        let response: GenerateContentResponse = serde_json::from_str(payload)
            .map_err(|e| ResponderError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ResponderError::ApiError(error.message));
        }

        Ok(Self::extract_text(&response)
            .map(StreamItem::Text)
            .unwrap_or(StreamItem::Skip))
    }

    /// Extract text from a response event
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    async fn complete(
        &self,
        transcript: &Transcript,
        on_chunk: Option<ChunkCallback>,
    ) -> Result<String, ResponderError> {
        let body = Self::build_request(transcript);
        debug!(model = %self.model, contents = body.contents.len(), "gemini request");

        let response = self
            .client
            .post(self.api_url())
            .timeout(self.timeout.as_std())
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
