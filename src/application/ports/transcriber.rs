//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::PcmAudio;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty transcription response")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to encode audio: {0}")]
    EncodingFailed(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for speech-to-text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw PCM audio to text.
    ///
    /// # Arguments
    /// * `audio` - Interleaved 16-bit samples with their rate and channel count
    ///
    /// # Returns
    /// The transcribed text or an error
    async fn transcribe(&self, audio: &PcmAudio) -> Result<String, TranscriptionError>;
}

/// Blanket implementation for boxed transcriber types
#[async_trait]
impl Transcriber for Box<dyn Transcriber> {
    async fn transcribe(&self, audio: &PcmAudio) -> Result<String, TranscriptionError> {
        self.as_ref().transcribe(audio).await
    }
}
