//! Responder port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::interview::Transcript;

/// Responder errors
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("The interviewer returned an empty reply")]
    EmptyResponse,

    #[error("Request timed out")]
    Timeout,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Callback receiving reply text incrementally, in arrival order.
/// Concatenating every chunk yields the final reply.
pub type ChunkCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Port for the chat model that plays the interviewer
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce the interviewer's next reply.
    ///
    /// # Arguments
    /// * `transcript` - The entire conversation, system turn first
    /// * `on_chunk` - Optional callback for streamed display
    ///
    /// # Returns
    /// The fully assembled reply text or an error
    async fn complete(
        &self,
        transcript: &Transcript,
        on_chunk: Option<ChunkCallback>,
    ) -> Result<String, ResponderError>;
}

/// Blanket implementation for boxed responder types
#[async_trait]
impl Responder for Box<dyn Responder> {
    async fn complete(
        &self,
        transcript: &Transcript,
        on_chunk: Option<ChunkCallback>,
    ) -> Result<String, ResponderError> {
        self.as_ref().complete(transcript, on_chunk).await
    }
}
