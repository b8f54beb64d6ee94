//! OpenAI audio transcription adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::recording::Duration;
use crate::domain::transcription::{AudioData, PcmAudio};
use crate::infrastructure::http::HttpFailure;
use crate::infrastructure::recording::encode_to_wav;

/// Speech-to-text model
const DEFAULT_MODEL: &str = "whisper-1";

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// OpenAI transcriber: WAV upload to `/audio/transcriptions`
pub struct OpenAiTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiTranscriber {
    /// Create a new OpenAI transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::default_request_timeout(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a custom transcription model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
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
        format!("{}/audio/transcriptions", self.base_url)
    }

    fn build_form(&self, audio: AudioData) -> Result<Form, TranscriptionError> {
        let file_name = audio.file_name();
        let mime = audio.mime_type().as_str();
        let part = Part::bytes(audio.into_data())
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| TranscriptionError::EncodingFailed(e.to_string()))?;

        Ok(Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "json"))
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio: &PcmAudio) -> Result<String, TranscriptionError> {
        let wav =
            encode_to_wav(audio).map_err(|e| TranscriptionError::EncodingFailed(e.to_string()))?;
        debug!(
            size = %wav.human_readable_size(),
            model = %self.model,
            "uploading WAV for transcription"
        );

        let form = self.build_form(wav)?;

        let response = self
            .client
            .post(self.api_url())
            .timeout(self.timeout.as_std())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(HttpFailure::from_transport)?;

        if !response.status().is_success() {
            return Err(HttpFailure::from_response(response).await.into());
        }

        let response: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let text = response.text.unwrap_or_default();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_uses_transcriptions_endpoint() {
        let transcriber = OpenAiTranscriber::new("key").with_base_url("http://localhost:9999/v1/");
        assert_eq!(
            transcriber.api_url(),
            "http://localhost:9999/v1/audio/transcriptions"
        );
    }

    #[test]
    fn default_model_is_whisper() {
        let transcriber = OpenAiTranscriber::new("key");
        assert_eq!(transcriber.model, "whisper-1");
    }

    #[tokio::test]
    async fn empty_capture_fails_before_upload() {
        // Unroutable base: an attempted request would fail differently
        let transcriber = OpenAiTranscriber::new("key").with_base_url("http://127.0.0.1:1");
        let err = transcriber
            .transcribe(&PcmAudio::new(Vec::new(), 16_000, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::EncodingFailed(_)));
    }
}
